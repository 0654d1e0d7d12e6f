use serde::{Deserialize, Serialize};

/// One directory entry. Every field defaults to an empty string when the search service
/// omits it
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonRecord {
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub title: String,
    pub department_affiliation: String,
    pub email: String,
    pub phone: String,
    pub mail_code: String,
    pub photo_url: String,
}

impl PersonRecord {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        PersonRecord {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            display_name: format!("{} {}", first_name, last_name).trim().to_string(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: &str, department_affiliation: &str) -> Self {
        self.title = title.to_string();
        self.department_affiliation = department_affiliation.to_string();
        self
    }

    pub fn with_contact(mut self, email: &str, phone: &str, mail_code: &str) -> Self {
        self.email = email.to_string();
        self.phone = phone.to_string();
        self.mail_code = mail_code.to_string();
        self
    }

    pub fn with_photo_url(mut self, photo_url: &str) -> Self {
        self.photo_url = photo_url.to_string();
        self
    }

    /// Name to speak or print, falls back to first + last name when the service has no display name
    pub fn name(&self) -> String {
        if !self.display_name.trim().is_empty() {
            return self.display_name.clone();
        }

        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn new_test() -> Self {
        PersonRecord::new("Michael", "Crow")
            .with_title("President", "Office of the President")
            .with_contact("michael.crow@asu.edu", "4809658972", "7705")
    }
}
