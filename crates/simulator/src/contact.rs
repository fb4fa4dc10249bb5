//! Pre-filled messaging link sent to the franchise.

use purific_catalog::Purifier;

use crate::calculator::Projection;

/// Number the storefront receives orders on.
pub const DEFAULT_RECIPIENT: &str = "5581992657235";

const BASE_URL: &str = "https://wa.me";

/// A chat deep link with the visitor's simulation in the message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLink {
    recipient: String,
    message: String,
}

impl ContactLink {
    pub fn new(recipient: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            message: message.into(),
        }
    }

    /// Link asking about `purifier`, quoting the 5-year savings.
    pub fn for_projection(
        recipient: impl Into<String>,
        projection: &Projection,
        purifier: &Purifier,
    ) -> Self {
        let message = format!(
            "Olá! Fiz a simulação e vi que posso economizar R$ {:.2} em 5 anos. \
             Quero saber mais sobre o {}!",
            projection.savings_5y, purifier.description
        );
        Self::new(recipient, message)
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn url(&self) -> String {
        format!(
            "{BASE_URL}/{}?text={}",
            urlencoding::encode(&self.recipient),
            urlencoding::encode(&self.message)
        )
    }
}

impl core::fmt::Display for ContactLink {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.url())
    }
}
