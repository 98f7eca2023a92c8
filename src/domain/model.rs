use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// History 最多保留的狗數量；溢出時淘汰最舊的
pub const HISTORY_CAPACITY: usize = 10;

/// 品種中繼資料（API `breeds` 陣列的元素）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breed {
    pub name: String,
    #[serde(default)]
    pub temperament: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
}

impl Breed {
    /// 性格欄位是逗號分隔字串；逐一修剪前後空白
    pub fn temperament_tokens(&self) -> Vec<&str> {
        self.temperament
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// 影像搜尋 API 回傳的單筆結果
#[derive(Debug, Clone, Deserialize)]
pub struct ApiImage {
    pub url: String,
    #[serde(default)]
    pub breeds: Vec<Breed>,
}

/// 一隻已接受顯示的狗：影像 + 第一個品種 + 接受時間
#[derive(Debug, Clone, PartialEq)]
pub struct Dog {
    pub image_url: String,
    pub breed: Breed,
    pub discovered_at: DateTime<Utc>,
}

impl Dog {
    /// 取第一個品種；沒有品種資料的結果視為無效
    pub fn from_api(image: ApiImage) -> Option<Self> {
        let ApiImage { url, mut breeds } = image;
        if breeds.is_empty() || breeds[0].name.is_empty() {
            return None;
        }
        Some(Self {
            image_url: url,
            breed: breeds.swap_remove(0),
            discovered_at: Utc::now(),
        })
    }
}

/// 封鎖清單：以插入順序呈現、成員查詢去重
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BanList {
    values: Vec<String>,
}

impl BanList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已存在時為 no-op；回傳是否真的改變了清單
    pub fn add(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.values.contains(&value) {
            return false;
        }
        self.values.push(value);
        true
    }

    /// 不存在時為 no-op；回傳是否真的移除了
    pub fn remove(&mut self, value: &str) -> bool {
        let before = self.values.len();
        self.values.retain(|v| v != value);
        self.values.len() != before
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 最近顯示過的狗，最新在前
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<Dog>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// 前插；超過容量時丟棄尾端（不去重，同一張圖可出現兩次）
    pub fn record(&mut self, dog: Dog) {
        self.entries.push_front(dog);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dog> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
