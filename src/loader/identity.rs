//! Assembly display names.

use sha1::{Digest, Sha1};

use crate::{
    metadata::{
        tables::{AssemblyRaw, ModuleRaw},
        view::MetadataView,
    },
    Result,
};

/// `AssemblyFlags.PublicKey`: the public key column holds the full key, not a token
const PUBLIC_KEY_FLAG: u32 = 0x0001;

/// Identity of an assembly, as shown in the listing header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyIdentity {
    /// Simple name
    pub name: String,
    /// `major.minor.build.revision`
    pub version: (u32, u32, u32, u32),
    /// Culture name; empty for the invariant culture
    pub culture: String,
    /// Eight-byte public key token, if the assembly is strong-named
    pub public_key_token: Option<[u8; 8]>,
}

impl AssemblyIdentity {
    /// Read the identity from the `Assembly` table of `view`
    ///
    /// # Errors
    /// Returns an error if the name, culture or key cannot be read from the heaps.
    pub fn from_view(view: &MetadataView<'_>) -> Result<Option<AssemblyIdentity>> {
        let Some(row) = view
            .tables
            .table::<AssemblyRaw>()
            .and_then(|table| table.get(1))
        else {
            return Ok(None);
        };

        let key = view.blobs.get(row.public_key as usize)?;
        let public_key_token = match (key.is_empty(), row.flags & PUBLIC_KEY_FLAG != 0) {
            (true, _) => None,
            (false, true) => Some(public_key_token(key)),
            (false, false) => key.get(..8).and_then(|token| token.try_into().ok()),
        };

        Ok(Some(AssemblyIdentity {
            name: view.strings.get(row.name as usize)?.to_string(),
            version: (
                row.major_version,
                row.minor_version,
                row.build_number,
                row.revision_number,
            ),
            culture: view.strings.get(row.culture as usize)?.to_string(),
            public_key_token,
        }))
    }

    /// `Name, Version=a.b.c.d, Culture=neutral, PublicKeyToken=null`
    #[must_use]
    pub fn full_name(&self) -> String {
        let culture = if self.culture.is_empty() {
            "neutral"
        } else {
            self.culture.as_str()
        };
        let token = match &self.public_key_token {
            Some(token) => token.iter().map(|byte| format!("{byte:02x}")).collect(),
            None => "null".to_string(),
        };

        format!(
            "{}, Version={}.{}.{}.{}, Culture={}, PublicKeyToken={}",
            self.name,
            self.version.0,
            self.version.1,
            self.version.2,
            self.version.3,
            culture,
            token
        )
    }
}

/// The last eight bytes of the SHA-1 hash of `public_key`, in reverse order
#[must_use]
pub fn public_key_token(public_key: &[u8]) -> [u8; 8] {
    let hash = Sha1::digest(public_key);

    let mut token = [0_u8; 8];
    for (target, source) in token.iter_mut().zip(hash.iter().rev()) {
        *target = *source;
    }
    token
}

/// Name shown for a module: the assembly full name, else the module name
///
/// # Errors
/// Returns an error if the identity rows reference invalid heap entries.
pub fn display_name(view: &MetadataView<'_>) -> Result<String> {
    if let Some(identity) = AssemblyIdentity::from_view(view)? {
        return Ok(identity.full_name());
    }

    match view.tables.table::<ModuleRaw>().and_then(|table| table.get(1)) {
        Some(module) => Ok(view.strings.get(module.name as usize)?.to_string()),
        None => Ok(String::new()),
    }
}
