//! # ContentId Value Object
//!
//! ゲートウェイが返すコンテンツ識別子（CID）

use std::fmt;
use std::str::FromStr;

use cid::Cid;

/// コンテンツ識別子
///
/// ゲートウェイから返された `Hash` をパースした検証済みの CID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(Cid);

impl ContentId {
    /// CIDへの参照を返す
    pub fn cid(&self) -> &Cid {
        &self.0
    }
}

impl From<Cid> for ContentId {
    fn from(cid: Cid) -> Self {
        Self(cid)
    }
}

impl FromStr for ContentId {
    type Err = cid::Error;

    /// CIDv0（`Qm...`）と CIDv1（`bafy...`）の両方を受け付けます。
    ///
    /// ```
    /// use ipfs_upload::domain::entities::content_id::ContentId;
    ///
    /// let id: ContentId = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG".parse().unwrap();
    /// assert_eq!(id.to_string(), "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG");
    ///
    /// assert!("not-a-cid".parse::<ContentId>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cid::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
