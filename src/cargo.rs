use serde::{Deserialize, Serialize};

/// Energy a worker is carrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cargo {
    pub amount: u32,
    pub capacity: u32,
}

impl Cargo {
    pub fn new(capacity: u32) -> Self {
        Self { amount: 0, capacity }
    }

    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }

    pub fn is_full(&self) -> bool {
        self.amount >= self.capacity
    }

    pub fn free(&self) -> u32 {
        self.capacity.saturating_sub(self.amount)
    }

    /// Adds up to `amount`, returning how much fit.
    pub fn load(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.free());
        self.amount = self.amount.saturating_add(taken);
        taken
    }

    /// Removes up to `amount`, returning how much left the cargo.
    pub fn unload(&mut self, amount: u32) -> u32 {
        let given = amount.min(self.amount);
        self.amount -= given;
        given
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_caps_at_capacity() {
        let mut c = Cargo::new(100);
        assert_eq!(c.load(60), 60);
        assert_eq!(c.load(60), 40);
        assert!(c.is_full());
        assert_eq!(c.free(), 0);
    }

    #[test]
    fn unload_caps_at_amount() {
        let mut c = Cargo::new(50);
        c.load(30);
        assert_eq!(c.unload(45), 30);
        assert!(c.is_empty());
    }

    #[test]
    fn zero_capacity_is_both_empty_and_full() {
        let c = Cargo::default();
        assert!(c.is_empty());
        assert!(c.is_full());
    }
}
