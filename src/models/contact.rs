use serde::{Deserialize, Serialize};

/// Body for `POST /orders/contact/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Acknowledgement returned by the contact endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAck {
    #[serde(default)]
    pub message: String,
}

/// Public store contact details from `GET /orders/contact-info/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub country_code: String,
}

impl ContactInfo {
    /// Phone number with the country code prepended when the stored number
    /// is local.
    pub fn international_phone(&self) -> String {
        let phone = self.phone.trim();
        if phone.starts_with('+') || self.country_code.is_empty() {
            phone.to_string()
        } else {
            format!("{}{}", self.country_code, phone)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn international_phone_prefixes_local_numbers() {
        let info = ContactInfo {
            phone: "58055337".into(),
            country_code: "+216".into(),
            ..Default::default()
        };
        assert_eq!(info.international_phone(), "+21658055337");

        let already = ContactInfo {
            phone: "+33 1 23".into(),
            country_code: "+216".into(),
            ..Default::default()
        };
        assert_eq!(already.international_phone(), "+33 1 23");
    }
}
