use crate::models::{Company, Contact};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query parameters shared by the autocomplete endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CompanyMatch {
    pub company_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub siret: Option<String>,
    pub vat_number: Option<String>,
}

impl From<&Company> for CompanyMatch {
    fn from(company: &Company) -> Self {
        Self {
            company_id: company.company_id,
            name: company.name.clone(),
            address: company.address.clone(),
            city: company.city.clone(),
            siret: company.siret.clone(),
            vat_number: company.vat_number.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactMatch {
    pub contact_id: Uuid,
    pub company_id: Option<Uuid>,
    pub display_name: String,
    pub email: Option<String>,
}

impl From<&Contact> for ContactMatch {
    fn from(contact: &Contact) -> Self {
        Self {
            contact_id: contact.contact_id,
            company_id: contact.company_id,
            display_name: contact.full_name(),
            email: contact.email.clone(),
        }
    }
}
