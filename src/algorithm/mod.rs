mod traits;

pub mod aes;
pub mod hmac;

pub use aes::Aes128;
pub use hmac::Hs256;
pub use traits::SigningMethod;

/// Policy for allowed methods
///
/// An empty policy places no restriction: any method found in the registry is
/// accepted. A non-empty policy only accepts the listed `alg` identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlgorithmPolicy {
    allowed: Vec<String>,
}

impl AlgorithmPolicy {
    /// Policy that accepts every registered method
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Create a policy that allows only specific methods
    pub fn allow_only<I, S>(algorithms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: algorithms.into_iter().map(Into::into).collect(),
        }
    }

    /// Policy that allows only AES128
    pub fn aes128_only() -> Self {
        Self::allow_only([Aes128::ALG])
    }

    /// Policy that allows only HS256
    pub fn hs256_only() -> Self {
        Self::allow_only([Hs256::ALG])
    }

    /// The listed identifiers, in the order they were given
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Whether the policy restricts anything at all
    pub fn is_unrestricted(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Check if a method is allowed
    pub fn is_allowed(&self, alg: &str) -> bool {
        self.is_unrestricted() || self.allowed.iter().any(|allowed| allowed == alg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_policy_allows_everything() {
        let policy = AlgorithmPolicy::allow_all();
        assert!(policy.is_unrestricted());
        assert!(policy.is_allowed("AES128"));
        assert!(policy.is_allowed("anything"));
    }

    #[test]
    fn test_allow_only() {
        let policy = AlgorithmPolicy::allow_only(["HS256", "AES128"]);
        assert!(!policy.is_unrestricted());
        assert!(policy.is_allowed("HS256"));
        assert!(policy.is_allowed("AES128"));
        assert!(!policy.is_allowed("hs256"));
        assert!(!policy.is_allowed("none"));
        assert_eq!(policy.allowed(), ["HS256", "AES128"]);
    }

    #[test]
    fn test_single_method_policies() {
        assert!(AlgorithmPolicy::aes128_only().is_allowed("AES128"));
        assert!(!AlgorithmPolicy::aes128_only().is_allowed("HS256"));
        assert!(AlgorithmPolicy::hs256_only().is_allowed("HS256"));
        assert!(!AlgorithmPolicy::hs256_only().is_allowed("AES128"));
    }
}
