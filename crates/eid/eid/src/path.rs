//! File addressing for SELECT

use std::fmt;

use bytes::Bytes;

/// How the identifier of a SELECT command is interpreted (P1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SelectMode {
    /// Dedicated file under the current DF
    ChildDf = 0x01,
    /// Elementary file under the current DF
    ChildEf = 0x02,
    /// Application identifier
    Aid = 0x04,
    /// Path starting at the master file (MF identifier omitted)
    PathFromMf = 0x08,
    /// Path starting at the current DF
    PathFromCurrentDf = 0x09,
}

impl SelectMode {
    /// P1 byte of the SELECT command
    pub const fn p1(self) -> u8 {
        self as u8
    }

    /// Whether the identifier is a concatenation of file identifiers
    pub const fn is_path(self) -> bool {
        matches!(self, Self::PathFromMf | Self::PathFromCurrentDf)
    }
}

impl TryFrom<u8> for SelectMode {
    type Error = u8;

    fn try_from(p1: u8) -> Result<Self, Self::Error> {
        match p1 {
            0x01 => Ok(Self::ChildDf),
            0x02 => Ok(Self::ChildEf),
            0x04 => Ok(Self::Aid),
            0x08 => Ok(Self::PathFromMf),
            0x09 => Ok(Self::PathFromCurrentDf),
            other => Err(other),
        }
    }
}

/// A selectable file: identifier bytes plus the mode they are interpreted in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePath {
    mode: SelectMode,
    id: Bytes,
}

impl FilePath {
    /// Create a path from owned identifier bytes
    pub fn new(mode: SelectMode, id: impl Into<Bytes>) -> Self {
        Self {
            mode,
            id: id.into(),
        }
    }

    /// Create a path from a static identifier, usable in static tables
    pub const fn from_static(mode: SelectMode, id: &'static [u8]) -> Self {
        Self {
            mode,
            id: Bytes::from_static(id),
        }
    }

    /// Application identifier
    pub fn aid(aid: impl Into<Bytes>) -> Self {
        Self::new(SelectMode::Aid, aid)
    }

    /// Elementary file under the current DF
    pub fn child_ef(fid: [u8; 2]) -> Self {
        Self::new(SelectMode::ChildEf, Bytes::copy_from_slice(&fid))
    }

    /// Selection mode
    pub const fn mode(&self) -> SelectMode {
        self.mode
    }

    /// Identifier bytes sent as SELECT data
    pub const fn id(&self) -> &Bytes {
        &self.id
    }

    /// Two-byte file identifiers making up a path
    ///
    /// AIDs are returned as a single component.
    pub fn components(&self) -> Vec<&[u8]> {
        if self.mode.is_path() {
            self.id.chunks(2).collect()
        } else {
            vec![self.id.as_ref()]
        }
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let components: Vec<String> = self
            .components()
            .into_iter()
            .map(hex::encode_upper)
            .collect();
        write!(f, "{} ({:#04x})", components.join("/"), self.mode.p1())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_select_mode_p1() {
        assert_eq!(SelectMode::ChildDf.p1(), 0x01);
        assert_eq!(SelectMode::ChildEf.p1(), 0x02);
        assert_eq!(SelectMode::Aid.p1(), 0x04);
        assert_eq!(SelectMode::PathFromMf.p1(), 0x08);
        assert_eq!(SelectMode::PathFromCurrentDf.p1(), 0x09);

        assert_eq!(SelectMode::try_from(0x09), Ok(SelectMode::PathFromCurrentDf));
        assert_eq!(SelectMode::try_from(0x03), Err(0x03));
    }

    #[test]
    fn test_path_components() {
        let path = FilePath::new(SelectMode::PathFromCurrentDf, hex!("3F00ADF13401").to_vec());
        assert_eq!(
            path.components(),
            vec![&hex!("3F00")[..], &hex!("ADF1")[..], &hex!("3401")[..]]
        );
        assert_eq!(path.to_string(), "3F00/ADF1/3401 (0x09)");

        let aid = FilePath::aid(hex!("A000000063504B43532D3135").to_vec());
        assert_eq!(aid.components().len(), 1);
        assert_eq!(aid.mode(), SelectMode::Aid);
    }

    #[test]
    fn test_child_ef() {
        let path = FilePath::child_ef([0x50, 0x23]);
        assert_eq!(path.mode(), SelectMode::ChildEf);
        assert_eq!(path.id().as_ref(), &[0x50, 0x23]);
    }
}
