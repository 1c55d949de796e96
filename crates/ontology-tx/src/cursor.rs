/// Byte order for multi-byte reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Forward-reading view over an immutable byte slice.
///
/// The offset never exceeds the slice length. A read either consumes exactly the
/// bytes it returns or fails with `None` and leaves the offset untouched, so a
/// failed read can never be observed half-applied.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// The whole underlying buffer, independent of the current offset.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_at_end(&self) -> bool {
        self.offset == self.data.len()
    }

    pub fn can_read(&self, n: usize) -> bool {
        n <= self.remaining()
    }

    /// Move to an absolute position in `[0, len]`.
    pub fn seek_to(&mut self, pos: usize) -> Option<()> {
        if pos > self.data.len() {
            return None;
        }
        self.offset = pos;
        Some(())
    }

    /// Move relative to the current position, staying inside `[0, len]`.
    pub fn seek_by(&mut self, delta: isize) -> Option<()> {
        let target = self.offset.checked_add_signed(delta)?;
        self.seek_to(target)
    }

    /// Next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }

    /// Byte at an absolute position, independent of the current offset.
    pub fn peek_at(&self, pos: usize) -> Option<u8> {
        self.data.get(pos).copied()
    }

    pub fn read_bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.offset.checked_add(n)?;
        let bytes = self.data.get(self.offset..end)?;
        self.offset = end;
        Some(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Option<&'a [u8; N]> {
        let bytes = self.read_bytes(N)?;
        bytes.try_into().ok()
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.offset += 1;
        Some(byte)
    }

    pub fn read_u16(&mut self, endian: Endian) -> Option<u16> {
        let bytes = *self.read_array::<2>()?;
        Some(match endian {
            Endian::Little => u16::from_le_bytes(bytes),
            Endian::Big => u16::from_be_bytes(bytes),
        })
    }

    pub fn read_u32(&mut self, endian: Endian) -> Option<u32> {
        let bytes = *self.read_array::<4>()?;
        Some(match endian {
            Endian::Little => u32::from_le_bytes(bytes),
            Endian::Big => u32::from_be_bytes(bytes),
        })
    }

    pub fn read_u64(&mut self, endian: Endian) -> Option<u64> {
        let bytes = *self.read_array::<8>()?;
        Some(match endian {
            Endian::Little => u64::from_le_bytes(bytes),
            Endian::Big => u64::from_be_bytes(bytes),
        })
    }

    /// Consume `expected` if the next bytes match it exactly.
    pub fn expect(&mut self, expected: &[u8]) -> Option<()> {
        let end = self.offset.checked_add(expected.len())?;
        if self.data.get(self.offset..end)? != expected {
            return None;
        }
        self.offset = end;
        Some(())
    }

    /// Whether the bytes at `pos` match `pattern`, without moving.
    pub fn matches_at(&self, pos: usize, pattern: &[u8]) -> bool {
        pos.checked_add(pattern.len())
            .and_then(|end| self.data.get(pos..end))
            .is_some_and(|bytes| bytes == pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives_little_endian() {
        let data = hex::decode("01020304050607080910111213141516").unwrap();
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_u8(), Some(0x01));
        assert_eq!(cursor.read_u16(Endian::Little), Some(0x0302));
        assert_eq!(cursor.read_u32(Endian::Little), Some(0x07060504));
        assert_eq!(cursor.read_u64(Endian::Little), Some(0x1514131211100908));
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_read_big_endian() {
        let data = [0x12, 0x34];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_u16(Endian::Big), Some(0x1234));
    }

    #[test]
    fn test_failed_read_keeps_offset() {
        let data = [1, 2, 3];
        let mut cursor = Cursor::new(&data);
        cursor.read_u8().unwrap();
        assert_eq!(cursor.read_u32(Endian::Little), None);
        assert_eq!(cursor.offset(), 1);
        assert_eq!(cursor.read_bytes(3), None);
        assert_eq!(cursor.offset(), 1);
        assert_eq!(cursor.read_bytes(2), Some(&[2u8, 3][..]));
        assert_eq!(cursor.read_u8(), None);
        assert_eq!(cursor.offset(), 3);
    }

    #[test]
    fn test_seek_bounds() {
        let data = [0u8; 4];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.seek_to(4), Some(()));
        assert!(cursor.is_at_end());
        assert_eq!(cursor.seek_to(5), None);
        assert_eq!(cursor.offset(), 4);
        assert_eq!(cursor.seek_by(-4), Some(()));
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.seek_by(-1), None);
        assert_eq!(cursor.seek_by(5), None);
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let data = [7, 8];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.peek(), Some(7));
        assert_eq!(cursor.peek_at(1), Some(8));
        assert_eq!(cursor.peek_at(2), None);
        assert_eq!(cursor.offset(), 0);
        cursor.seek_to(2).unwrap();
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_expect_constant() {
        let data = [0x6a, 0x7c, 0xc8, 0x6c];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.expect(&[0x6a, 0x7c, 0xc9]), None);
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.expect(&[0x6a, 0x7c, 0xc8]), Some(()));
        assert_eq!(cursor.expect(&[0x6c, 0x00]), None);
        assert_eq!(cursor.offset(), 3);
        assert!(cursor.matches_at(0, &[0x6a, 0x7c, 0xc8, 0x6c]));
        assert!(!cursor.matches_at(2, &[0xc8, 0x6c, 0x00]));
    }

    #[test]
    fn test_read_array_borrows() {
        let data = [9u8; 20];
        let mut cursor = Cursor::new(&data);
        let addr: &[u8; 20] = cursor.read_array().unwrap();
        assert!(core::ptr::eq(addr.as_ptr(), data.as_ptr()));
    }
}
