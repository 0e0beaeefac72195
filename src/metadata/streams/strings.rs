use std::ffi::CStr;

use crate::Result;

/// The `#Strings` heap: NUL-terminated UTF-8 identifiers (ECMA-335 II.24.2.3)
///
/// ```rust
/// use asmdump::Strings;
///
/// let heap = Strings::from(b"\0Foo\0System\0")?;
/// assert_eq!(heap.get(1)?, "Foo");
/// assert_eq!(heap.get(5)?, "System");
/// # Ok::<(), asmdump::Error>(())
/// ```
pub struct Strings<'a> {
    data: &'a [u8],
}

impl<'a> Strings<'a> {
    /// Wrap the heap data; the first byte must be the empty string
    ///
    /// # Errors
    /// Returns an error if the heap is empty or does not start with a NUL byte.
    pub fn from(data: &'a [u8]) -> Result<Strings<'a>> {
        if data.is_empty() || data[0] != 0 {
            return Err(malformed_error!("Provided #Strings heap is invalid"));
        }

        Ok(Strings { data })
    }

    /// Get the string starting at `index`
    ///
    /// # Errors
    /// Returns an error if `index` is outside of the heap or the string is not valid UTF-8.
    pub fn get(&self, index: usize) -> Result<&'a str> {
        if index >= self.data.len() {
            return Err(out_of_bounds_error!());
        }

        CStr::from_bytes_until_nul(&self.data[index..])
            .ok()
            .and_then(|result| result.to_str().ok())
            .ok_or_else(|| malformed_error!("Invalid string at index - {}", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        let data = b"\0<Module>\0System.Runtime\0Object\0";
        let heap = Strings::from(data).unwrap();

        assert_eq!(heap.get(0).unwrap(), "");
        assert_eq!(heap.get(1).unwrap(), "<Module>");
        assert_eq!(heap.get(10).unwrap(), "System.Runtime");
        assert_eq!(heap.get(17).unwrap(), "Runtime");
        assert_eq!(heap.get(25).unwrap(), "Object");
        assert!(heap.get(data.len()).is_err());
    }

    #[test]
    fn invalid_heap() {
        assert!(Strings::from(&[]).is_err());
        assert!(Strings::from(b"A\0").is_err());

        let heap = Strings::from(b"\0AB").unwrap();
        assert!(heap.get(1).is_err());
    }
}
