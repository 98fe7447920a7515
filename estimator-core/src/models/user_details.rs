use serde::{Deserialize, Serialize};

/// Contact details collected on the user details step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
}

/// Addresses a single field of [`UserDetails`] in a form update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDetailField {
    Name,
    Email,
    Phone,
    City,
}

impl UserDetails {
    pub fn set(
        &mut self,
        field: UserDetailField,
        value: String,
    ) {
        match field {
            UserDetailField::Name => self.name = value,
            UserDetailField::Email => self.email = value,
            UserDetailField::Phone => self.phone = value,
            UserDetailField::City => self.city = value,
        }
    }

    pub fn get(
        &self,
        field: UserDetailField,
    ) -> &str {
        match field {
            UserDetailField::Name => &self.name,
            UserDetailField::Email => &self.email,
            UserDetailField::Phone => &self.phone,
            UserDetailField::City => &self.city,
        }
    }
}

impl UserDetailField {
    pub const ALL: [UserDetailField; 4] = [
        UserDetailField::Name,
        UserDetailField::Email,
        UserDetailField::Phone,
        UserDetailField::City,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::City => "City",
        }
    }
}
