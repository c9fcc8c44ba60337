//! # Vendor Repository
//!
//! Vendor registration and admin approval.

use serde::Deserialize;
use tracing::info;
use vibez_core::validation::{validate_commission, validate_email};
use vibez_core::{SubscriptionPlan, ValidationError, Vendor, VendorStatus};

use crate::error::{CatalogError, CatalogResult};

/// Commission charged when a registration names none.
pub const DEFAULT_COMMISSION_PERCENT: u8 = 10;

const VENDOR_ID_PREFIX: &str = "vendor";

/// A vendor registration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVendor {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub commission: Option<u8>,
    #[serde(default)]
    pub subscription_plan: SubscriptionPlan,
}

/// Repository for vendors.
#[derive(Debug, Clone, Default)]
pub struct VendorRepository {
    vendors: Vec<Vendor>,
}

impl VendorRepository {
    pub fn new(vendors: Vec<Vendor>) -> Self {
        VendorRepository { vendors }
    }

    pub fn list(&self) -> &[Vendor] {
        &self.vendors
    }

    pub fn get(&self, id: &str) -> Option<&Vendor> {
        self.vendors.iter().find(|v| v.id == id)
    }

    pub fn require(&self, id: &str) -> CatalogResult<&Vendor> {
        self.get(id).ok_or_else(|| CatalogError::not_found("Vendor", id))
    }

    /// Registers a vendor. New vendors wait for admin approval.
    ///
    /// ## Rules
    /// - Name required, email well-formed and not already registered
    /// - Commission 0-100 (default 10)
    /// - Id is `vendor{n}` with `n` one past the highest existing number
    pub fn create(&mut self, new: NewVendor) -> CatalogResult<&Vendor> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required {
                field: "name".to_string(),
            }
            .into());
        }
        validate_email(&new.email)?;
        let commission = new.commission.unwrap_or(DEFAULT_COMMISSION_PERCENT);
        validate_commission(commission)?;

        let email = new.email.trim().to_lowercase();
        if self.vendors.iter().any(|v| v.email.eq_ignore_ascii_case(&email)) {
            return Err(CatalogError::duplicate("email", email));
        }

        let id = self.next_id()?;
        info!(vendor_id = %id, name = %name, "Vendor registered");

        self.vendors.push(Vendor {
            id: id.clone(),
            name: name.to_string(),
            email,
            status: VendorStatus::Pending,
            commission,
            subscription_plan: new.subscription_plan,
        });
        self.require(&id)
    }

    /// Admin approval or rejection.
    pub fn set_status(&mut self, id: &str, status: VendorStatus) -> CatalogResult<&Vendor> {
        let vendor = self
            .vendors
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| CatalogError::not_found("Vendor", id))?;
        vendor.status = status;

        info!(vendor_id = %id, status = %status, "Vendor status changed");
        Ok(&*vendor)
    }

    pub fn delete(&mut self, id: &str) -> CatalogResult<Vendor> {
        let index = self
            .vendors
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| CatalogError::not_found("Vendor", id))?;

        info!(vendor_id = %id, "Vendor deleted");
        Ok(self.vendors.remove(index))
    }

    /// Admin vendor search: `term` matches name or email (case-insensitive,
    /// empty matches all); `status` narrows to one status.
    pub fn search(&self, term: &str, status: Option<VendorStatus>) -> Vec<&Vendor> {
        let term = term.trim().to_lowercase();
        self.vendors
            .iter()
            .filter(|v| status.map_or(true, |s| v.status == s))
            .filter(|v| {
                term.is_empty()
                    || v.name.to_lowercase().contains(&term)
                    || v.email.to_lowercase().contains(&term)
            })
            .collect()
    }

    fn next_id(&self) -> CatalogResult<String> {
        let highest = self
            .vendors
            .iter()
            .filter_map(|v| v.id.strip_prefix(VENDOR_ID_PREFIX))
            .filter_map(|n| n.parse::<u32>().ok())
            .max();

        let next = match highest {
            None => 1,
            Some(max) => max
                .checked_add(1)
                .ok_or(CatalogError::IdsExhausted { entity: "vendor" })?,
        };
        Ok(format!("{}{}", VENDOR_ID_PREFIX, next))
    }
}
