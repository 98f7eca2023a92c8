use crate::domain::model::{BanList, Dog};
use crate::domain::ports::DogSource;
use crate::utils::error::{DogError, Result};

/// 單次 discover 呼叫內的重試上限
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// 抓取並過濾：重複向來源要隨機狗，直到品種不在封鎖清單上
pub struct DiscoverEngine<S: DogSource> {
    source: S,
    max_attempts: u32,
}

impl<S: DogSource> DiscoverEngine<S> {
    pub fn new(source: S) -> Self {
        Self::with_max_attempts(source, DEFAULT_MAX_ATTEMPTS)
    }

    pub fn with_max_attempts(source: S, max_attempts: u32) -> Self {
        Self {
            source,
            max_attempts,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// 迴圈內只有兩條路徑：接受並回傳，或計一次嘗試後重試。
    /// 網路錯誤與缺品種資料直接中止整個呼叫，不計入嘗試數。
    pub async fn discover(&self, ban_list: &BanList) -> Result<Dog> {
        let mut attempts = 0;
        while attempts < self.max_attempts {
            let image = self.source.fetch_random().await?;
            let dog = Dog::from_api(image).ok_or(DogError::MissingBreed)?;

            if !ban_list.contains(&dog.breed.name) {
                tracing::debug!(
                    "🐶 Accepted '{}' after {} banned rejections",
                    dog.breed.name,
                    attempts
                );
                return Ok(dog);
            }

            tracing::debug!("🚫 '{}' is on the ban list, retrying", dog.breed.name);
            attempts += 1;
        }

        Err(DogError::BanListExhausted { attempts })
    }
}
