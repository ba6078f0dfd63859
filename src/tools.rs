/// Parses the longest integer prefix of `s` the way C `strtol` does.
///
/// Leading whitespace is skipped and an optional sign is accepted. A string
/// without digits yields 0, and values out of `i64` range saturate.
pub fn parse_int_prefix(s: &str) -> i64 {
    let bytes = s.as_bytes();
    let mut pos = bytes
        .iter()
        .position(|&b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c))
        .unwrap_or(bytes.len());
    let negative = match bytes.get(pos).copied() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };
    let mut value: i64 = 0;
    for &b in bytes[pos..].iter().take_while(|b| b.is_ascii_digit()) {
        let digit = (b - b'0') as i64;
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Checked little-endian reads over a byte slice.
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.pos.checked_add(N)?;
        let mut buf = [0; N];
        buf.copy_from_slice(self.bytes.get(self.pos..end)?);
        self.pos = end;
        Some(buf)
    }

    pub fn peek_u64(&self) -> Option<u64> {
        let end = self.pos.checked_add(8)?;
        let mut buf = [0; 8];
        buf.copy_from_slice(self.bytes.get(self.pos..end)?);
        Some(u64::from_le_bytes(buf))
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|b| b[0])
    }

    pub fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    pub fn read_i32(&mut self) -> Option<i32> {
        self.take().map(i32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }
}
