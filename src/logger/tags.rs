/// Log tags identifying the subsystem a message originates from

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    Server,
    Api,
    Cache,
    Nft,
    Image,
}

impl LogTag {
    /// Fixed-width display name used in the log prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::Server => "SERVER",
            LogTag::Api => "API",
            LogTag::Cache => "CACHE",
            LogTag::Nft => "NFT",
            LogTag::Image => "IMAGE",
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
