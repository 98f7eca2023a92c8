use crate::domain::model::History;
use crate::domain::ports::Storage;
use crate::utils::error::{DogError, Result};

const CSV_FILENAME: &str = "history.csv";
const TSV_FILENAME: &str = "history.tsv";

/// 把 history buffer 寫成 CSV/TSV 檔（透過 Storage port）
pub struct HistoryExporter<S: Storage> {
    storage: S,
    csv_filename: String,
    tsv_filename: String,
}

impl<S: Storage> HistoryExporter<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            csv_filename: CSV_FILENAME.to_string(),
            tsv_filename: TSV_FILENAME.to_string(),
        }
    }

    pub fn with_filenames(
        storage: S,
        csv_filename: impl Into<String>,
        tsv_filename: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            csv_filename: csv_filename.into(),
            tsv_filename: tsv_filename.into(),
        }
    }

    /// 回傳寫出的檔名
    pub async fn export(&self, history: &History) -> Result<Vec<String>> {
        let csv_bytes = render(history, b',')?;
        let tsv_bytes = render(history, b'\t')?;

        tracing::debug!(
            "📁 Writing history export ({} entries, {} + {} bytes)",
            history.len(),
            csv_bytes.len(),
            tsv_bytes.len()
        );

        self.storage.write_file(&self.csv_filename, &csv_bytes).await?;
        self.storage.write_file(&self.tsv_filename, &tsv_bytes).await?;

        Ok(vec![self.csv_filename.clone(), self.tsv_filename.clone()])
    }
}

// csv::Writer 負責引號處理；性格字串本身就含逗號
fn render(history: &History, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record([
        "position",
        "breed",
        "origin",
        "temperament",
        "image_url",
        "discovered_at",
    ])?;

    for (index, dog) in history.iter().enumerate() {
        let position = (index + 1).to_string();
        let discovered_at = dog.discovered_at.to_rfc3339();
        writer.write_record([
            position.as_str(),
            dog.breed.name.as_str(),
            dog.breed.origin.as_deref().unwrap_or(""),
            dog.breed.temperament.as_deref().unwrap_or(""),
            dog.image_url.as_str(),
            discovered_at.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| DogError::IoError(e.into_error()))
}
