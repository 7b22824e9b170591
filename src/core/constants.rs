//! Application-wide constants.
//!
//! Field names, output columns and default values live here so the probe,
//! the output writer and the CLI agree on them.

/// security.txt field names
pub mod fields {
    /// The one field a file must carry to count as valid
    pub const CONTACT: &str = "contact";
    pub const EXPIRES: &str = "expires";
    pub const HIRING: &str = "hiring";
    pub const POLICY: &str = "policy";
    pub const ACKNOWLEDGEMENTS: &str = "acknowledgements";

    /// Fields whose absence makes a file invalid
    pub const REQUIRED: [&str; 1] = [CONTACT];

    /// Fields captured in the output, in column order
    pub const INTERESTING: [&str; 5] = [CONTACT, EXPIRES, HIRING, POLICY, ACKNOWLEDGEMENTS];
}

/// Output and input CSV layout
pub mod columns {
    /// Column holding the domain in the input file
    pub const DOMAIN: &str = "Domain";
    /// Column holding the 0-based source position in the output file
    pub const INDEX: &str = "index";
    /// Column holding the probed origin in the output file
    pub const SITE: &str = "site";

    /// Output header, in order
    pub const OUTPUT_HEADER: [&str; 7] = [
        INDEX,
        SITE,
        super::fields::CONTACT,
        super::fields::EXPIRES,
        super::fields::HIRING,
        super::fields::POLICY,
        super::fields::ACKNOWLEDGEMENTS,
    ];
}

/// HTTP constants
pub mod http {
    /// HTTP 200 OK - the only status that may carry a valid file
    pub const OK: u16 = 200;
    /// Scheme used for every probed origin
    pub const DEFAULT_SCHEME: &str = "https";
    /// Schemes accepted in configuration
    pub const SCHEMES: [&str; 2] = ["https", "http"];
    /// Maximum redirects followed per request
    pub const MAX_REDIRECTS: usize = 10;
}

/// Timeout constants
pub mod timeouts {
    /// Default per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;
}

/// Default configuration values
pub mod defaults {
    /// Candidate paths, checked in this order
    pub const CANDIDATE_PATHS: [&str; 2] = ["/.well-known/security.txt", "/security.txt"];
    /// Where logs go unless configured otherwise
    pub const LOG_FILE: &str = "./query.log";
    /// Log level written to the log file
    pub const LOG_LEVEL: &str = "trace";
    /// Config file looked up in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".sectxt-audit.toml";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_are_interesting() {
        for required in fields::REQUIRED {
            assert!(fields::INTERESTING.contains(&required));
        }
    }

    #[test]
    fn test_output_header() {
        assert_eq!(
            columns::OUTPUT_HEADER.join(","),
            "index,site,contact,expires,hiring,policy,acknowledgements"
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(timeouts::DEFAULT_TIMEOUT_SECONDS, 5);
        assert_eq!(defaults::CANDIDATE_PATHS[0], "/.well-known/security.txt");
        assert_eq!(defaults::CANDIDATE_PATHS[1], "/security.txt");
        assert_eq!(http::DEFAULT_SCHEME, "https");
    }
}
