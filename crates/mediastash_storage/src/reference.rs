//! `media:<id>` references stored in place of blobs.

use mediastash_interface::ObjectId;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static REFERENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^media:(.+)$").expect("Valid media reference regex"));

/// Pointer from an owning record's field to a stored media object.
///
/// Renders as `media:<id>`. Parsing is anchored: the whole text must match, and
/// the id must be non-empty.
///
/// # Examples
///
/// ```
/// use mediastash_interface::ObjectId;
/// use mediastash_storage::MediaReference;
///
/// let reference = MediaReference::new(ObjectId::Int(3));
/// assert_eq!(reference.to_string(), "media:3");
///
/// let parsed: MediaReference = "media:3".parse().unwrap();
/// assert_eq!(parsed.id(), &ObjectId::Str("3".to_string()));
/// assert!("picture.png".parse::<MediaReference>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[display("media:{}", id)]
pub struct MediaReference {
    id: ObjectId,
}

impl MediaReference {
    /// Reference the media object with the given id.
    pub fn new(id: ObjectId) -> Self {
        Self { id }
    }

    /// Id of the referenced media object.
    ///
    /// Parsed references always carry the textual form; media stores normalize
    /// it to their key type.
    pub fn id(&self) -> &ObjectId {
        &self.id
    }
}

/// Text that is not a `media:<id>` reference.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("not a media reference: {:?}", text)]
pub struct InvalidMediaReference {
    /// The rejected text
    pub text: String,
}

impl FromStr for MediaReference {
    type Err = InvalidMediaReference;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        REFERENCE_PATTERN
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|id| MediaReference::new(ObjectId::Str(id.as_str().to_string())))
            .ok_or_else(|| InvalidMediaReference {
                text: text.to_string(),
            })
    }
}
