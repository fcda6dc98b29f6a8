//! RAM-backed calibration storage.

use crate::error::HardwareError;

use super::CalibrationStore;

/// Byte storage that behaves like freshly erased EEPROM (every byte `0xFF`).
///
/// Useful on hosts and in tests; firmware supplies its own EEPROM-backed store.
#[derive(Debug, Clone)]
pub struct MemoryStore<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> Default for MemoryStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MemoryStore<N> {
    /// Create an erased store.
    pub const fn new() -> Self {
        Self { bytes: [0xFF; N] }
    }

    /// Raw contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn range(&self, address: u16, len: usize) -> Result<core::ops::Range<usize>, HardwareError> {
        let start = address as usize;
        let end = start
            .checked_add(len)
            .filter(|end| *end <= N)
            .ok_or(HardwareError::AddressOutOfRange(address))?;
        Ok(start..end)
    }
}

impl<const N: usize> CalibrationStore for MemoryStore<N> {
    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), HardwareError> {
        let range = self.range(address, buf.len())?;
        buf.copy_from_slice(&self.bytes[range]);
        Ok(())
    }

    fn write(&mut self, address: u16, data: &[u8]) -> Result<(), HardwareError> {
        let range = self.range(address, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erased_on_creation() {
        let store = MemoryStore::<8>::new();
        assert!(store.as_bytes().iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn test_write_then_read() {
        let mut store = MemoryStore::<8>::new();
        store.write(2, &[0x34, 0x12]).unwrap();

        let mut buf = [0u8; 2];
        store.read(2, &mut buf).unwrap();
        assert_eq!(buf, [0x34, 0x12]);
    }

    #[test]
    fn test_out_of_range() {
        let mut store = MemoryStore::<4>::new();
        let mut buf = [0u8; 2];
        assert_eq!(
            store.read(3, &mut buf),
            Err(HardwareError::AddressOutOfRange(3))
        );
        assert!(store.write(2, &[0, 0]).is_ok());
    }
}
