/// A value plus a version that bumps on every change.
///
/// Readers remember the version they last saw and ask `changed_since`
/// instead of being called back.
#[derive(Debug, Clone, Default)]
pub struct Watch<T> {
    value: T,
    version: u64,
}

impl<T: Copy + PartialEq> Watch<T> {
    pub fn new(value: T) -> Self {
        Self { value, version: 0 }
    }

    pub fn get(&self) -> T {
        self.value
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Store `value`. Writing an equal value is not a change.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.version += 1;
        true
    }

    pub fn changed_since(&self, version: u64) -> bool {
        self.version != version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_bumps_version_only_on_change() {
        let mut w = Watch::new(1.0f32);
        let seen = w.version();
        assert!(!w.set(1.0));
        assert!(!w.changed_since(seen));
        assert!(w.set(2.0));
        assert!(w.changed_since(seen));
        assert_eq!(w.get(), 2.0);
    }
}
