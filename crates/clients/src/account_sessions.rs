//! Client for the account-session service — registers and manages the
//! Telegram accounts the platform works with.

use crate::error::ClientError;
use outreach_core::types::AccountPurpose;
use serde::{Deserialize, Serialize};

/// A registered Telegram account session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramAccount {
    pub phone_number: String,
    pub account_name: String,
    pub purpose: AccountPurpose,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub account_name: String,
    pub purpose: AccountPurpose,
}

/// First registration step: ask Telegram to send the OTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeRequest {
    pub api_id: i64,
    pub api_hash: String,
    pub phone_number: String,
}

/// Second registration step: complete the login with the OTP (and the 2FA
/// password when the account has one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub account_name: String,
    pub purpose: AccountPurpose,
    pub api_id: i64,
    pub api_hash: String,
    pub phone_number: String,
    pub otp: String,
    pub password: Option<String>,
}

#[derive(Clone)]
pub struct AccountSessionsClient {
    http: reqwest::Client,
    base_url: String,
}

impl AccountSessionsClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn accounts(&self) -> Result<Vec<TelegramAccount>, ClientError> {
        let url = format!("{}/accounts", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }
        response
            .json()
            .await
            .map_err(|source| ClientError::Decode { url, source })
    }

    pub async fn update_account(
        &self,
        phone_number: &str,
        req: &UpdateAccountRequest,
    ) -> Result<(), ClientError> {
        let url = format!("{}/accounts/{}", self.base_url, phone_number);
        let response = self
            .http
            .put(&url)
            .json(req)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        expect_success(url, response).await
    }

    pub async fn delete_account(&self, phone_number: &str) -> Result<(), ClientError> {
        let url = format!("{}/accounts/{}", self.base_url, phone_number);
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        expect_success(url, response).await
    }

    pub async fn send_code(&self, req: &SendCodeRequest) -> Result<(), ClientError> {
        let url = format!("{}/send_code", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        expect_success(url, response).await
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<(), ClientError> {
        let url = format!("{}/login", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        expect_success(url, response).await
    }
}

async fn expect_success(url: String, response: reqwest::Response) -> Result<(), ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            url,
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purpose_round_trips_wire_spelling() {
        let account: TelegramAccount = serde_json::from_str(
            r#"{"phone_number":"+15550100","account_name":"tg_monitor_01","purpose":"Keyword_Monitor"}"#,
        )
        .unwrap();
        assert_eq!(account.purpose, AccountPurpose::KeywordMonitor);

        let body = serde_json::to_value(&UpdateAccountRequest {
            account_name: "tg_scraper_01".to_string(),
            purpose: AccountPurpose::GroupMemberScraping,
        })
        .unwrap();
        assert_eq!(body["purpose"], "Group_Member_Scraping");
    }

    #[test]
    fn login_request_carries_optional_password() {
        let req = LoginRequest {
            account_name: "tg_worker_01".to_string(),
            purpose: AccountPurpose::Outreach,
            api_id: 123456,
            api_hash: "abcdef".to_string(),
            phone_number: "+15550100".to_string(),
            otp: "12345".to_string(),
            password: None,
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["password"], serde_json::Value::Null);
        assert_eq!(body["api_id"], 123456);
    }
}
