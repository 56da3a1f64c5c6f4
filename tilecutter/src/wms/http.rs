//! HTTP client abstraction for testability

use super::FetchError;

/// Trait for the blocking HTTP GET the fetcher needs.
///
/// This abstraction allows for dependency injection and easier testing by
/// enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes, or an error for transport failures and
    /// non-success statuses alike.
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).get(url)
    }
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(30)
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| FetchError::Http(format!("Failed to read response: {}", e)))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock HTTP client for testing.
    ///
    /// Returns a fixed body for every request, optionally failing from the
    /// n-th request onward, and records every URL it was asked for.
    pub struct MockHttpClient {
        body: Vec<u8>,
        fail_from: Option<usize>,
        requests: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        pub fn new(body: Vec<u8>) -> Self {
            Self {
                body,
                fail_from: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Fail every request from the zero-based index `n` onward.
        pub fn failing_from(body: Vec<u8>, n: usize) -> Self {
            Self {
                fail_from: Some(n),
                ..Self::new(body)
            }
        }

        /// URLs requested so far, in order.
        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl HttpClient for MockHttpClient {
        fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            let mut requests = self.requests.lock().unwrap();
            let index = requests.len();
            requests.push(url.to_string());
            if self.fail_from.is_some_and(|n| index >= n) {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: 500,
                });
            }
            Ok(self.body.clone())
        }
    }

    #[test]
    fn test_mock_client_returns_body() {
        let mock = MockHttpClient::new(vec![1, 2, 3, 4]);
        assert_eq!(mock.get("http://example.com").unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(mock.requests(), vec!["http://example.com".to_string()]);
    }

    #[test]
    fn test_mock_client_fails_from_index() {
        let mock = MockHttpClient::failing_from(vec![0], 1);
        assert!(mock.get("http://example.com/first").is_ok());
        assert!(mock.get("http://example.com/second").is_err());
        assert_eq!(mock.requests().len(), 2);
    }
}
