use crate::domain::model::ApiImage;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 隨機狗影像的來源：真實 API 或測試替身
#[async_trait]
pub trait DogSource: Send + Sync {
    async fn fetch_random(&self) -> Result<ApiImage>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn api_key(&self) -> Option<String>;
    fn max_attempts(&self) -> u32;
    fn timeout_seconds(&self) -> Option<u64>;
    fn output_path(&self) -> &str;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
