use async_trait::async_trait;
use hcms_core::api::AuthApi;
use hcms_core::auth::{AdminCredentials, LoginCredentials};
use hcms_core::error::Result;
use reqwest::Method;

use crate::client::{Auth, HttpHospitalClient};

#[async_trait]
impl AuthApi for HttpHospitalClient {
    async fn admin_login(&self, credentials: &AdminCredentials) -> Result<String> {
        credentials.validate()?;
        let request = self
            .request(Method::POST, self.endpoints().admin_login(), Auth::Anonymous)
            .json(credentials);
        self.login(request).await
    }

    async fn doctor_login(&self, credentials: &LoginCredentials) -> Result<String> {
        credentials.validate()?;
        let request = self
            .request(Method::POST, self.endpoints().doctor_login(), Auth::Anonymous)
            .json(credentials);
        self.login(request).await
    }

    async fn patient_login(&self, credentials: &LoginCredentials) -> Result<String> {
        credentials.validate()?;
        let request = self
            .request(Method::POST, self.endpoints().patient_login(), Auth::Anonymous)
            .json(credentials);
        self.login(request).await
    }
}
