use fantoccini::{Client, ClientBuilder};
use std::sync::atomic::AtomicU64;
use tracing::info;

/// A WebDriver session. Implements [`elpath_engine::Driver`] in [`crate::driver`].
pub struct WebDriverClient {
    pub client: Client,
    // Tags elements returned by `js` definitions so they can be found again.
    pub(crate) script_marks: AtomicU64,
}

impl WebDriverClient {
    pub async fn connect(
        url: &str,
        capabilities: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut caps = serde_json::Map::new();

        if let Some(user_caps) = capabilities {
            for (k, v) in user_caps {
                caps.insert(k, v);
            }
        }

        info!("Connecting to WebDriver at {}...", url);
        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(url)
            .await
            .map_err(|e| format!("Failed to connect to WebDriver at {}: {}", url, e))?;

        Ok(Self::from_client(client))
    }

    /// Wrap a session opened elsewhere.
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            script_marks: AtomicU64::new(0),
        }
    }

    pub async fn goto(&self, url: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!("Navigating to: {}", url);
        self.client
            .goto(url)
            .await
            .map_err(|e| format!("Failed to navigate to {}: {}", url, e))?;
        Ok(())
    }

    pub async fn close(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.client
            .close()
            .await
            .map_err(|e| format!("Failed to close session: {}", e))?;
        Ok(())
    }
}
