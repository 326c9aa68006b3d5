//! Brand identity and payment boilerplate rendered on every document.

use serde::{Deserialize, Serialize};

/// Static letterhead for the issuing agency.
///
/// Nothing here comes from invoice or client records; these are the fixed
/// strings of the document template. `Default` carries the agency's
/// standing boilerplate, and callers with different letterhead supply their
/// own profile. Layout geometry does not depend on profile contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandProfile {
    pub company_name: String,
    pub address_lines: Vec<String>,
    pub contact_line: String,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub routing_number: String,
    pub thank_you_line: String,
    pub copyright_line: String,
}

impl Default for BrandProfile {
    fn default() -> Self {
        Self {
            company_name: "Brightpath Studio".to_string(),
            address_lines: vec![
                "742 Harrison Street, Suite 410".to_string(),
                "San Francisco, CA 94107".to_string(),
            ],
            contact_line: "hello@brightpath.studio | (415) 555-0134".to_string(),
            bank_name: "First National Bank".to_string(),
            account_name: "Brightpath Studio LLC".to_string(),
            account_number: "0001234567".to_string(),
            routing_number: "110000000".to_string(),
            thank_you_line: "Thank you for your business!".to_string(),
            copyright_line: "© Brightpath Studio. All rights reserved.".to_string(),
        }
    }
}
