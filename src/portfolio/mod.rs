//! Live certificates for one simulation run

mod certificate;

pub use certificate::Certificate;

use log::debug;
use serde::{Deserialize, Serialize};

/// Ordered collection of live certificates.
///
/// Order only matters for deterministic iteration; totals are order-free.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificatePortfolio {
    certificates: Vec<Certificate>,
}

impl CertificatePortfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_certificates(certificates: Vec<Certificate>) -> Self {
        Self { certificates }
    }

    /// One month of coupon interest across all live certificates.
    ///
    /// Coupons are paid out, so principal is untouched.
    pub fn accrue_month(&self) -> f64 {
        self.monthly_interest()
    }

    /// Age every certificate by one month and pull out the ones that reach
    /// the end of their term.
    ///
    /// Returns the surviving portfolio and the matured principal.
    pub fn mature_and_collect(&self) -> (Self, f64) {
        let mut matured = 0.0;
        let mut survivors = Vec::with_capacity(self.certificates.len());

        for cert in self.certificates.iter().map(|c| c.aged()) {
            if cert.has_matured() {
                debug!(
                    "Certificate from {} matured: principal {:.2} at {:.2}%",
                    cert.issued,
                    cert.principal,
                    cert.rate * 100.0
                );
                matured += cert.principal;
            } else {
                survivors.push(cert);
            }
        }

        (Self { certificates: survivors }, matured)
    }

    /// Add a new certificate. The caller guarantees a positive principal.
    pub fn issue(mut self, certificate: Certificate) -> Self {
        debug_assert!(certificate.principal > 0.0, "issued an empty certificate");
        self.certificates.push(certificate);
        self
    }

    /// Sum of coupons of the certificates currently held
    pub fn monthly_interest(&self) -> f64 {
        self.certificates.iter().map(Certificate::monthly_coupon).sum()
    }

    pub fn active_principal(&self) -> f64 {
        self.certificates.iter().map(|c| c.principal).sum()
    }

    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Certificate> {
        self.certificates.iter()
    }
}
