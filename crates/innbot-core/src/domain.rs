/// Chat id (numeric), shared across messenger implementations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Company record returned by the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanyInfo {
    pub name: String,
    /// May be empty; the formatter omits the address part then.
    pub address: String,
}
