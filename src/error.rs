use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChecklistError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("チェックリストが見つかりません: {0}")]
    NoFilesFound(String),

    #[error("シートがありません: '{sheet}' (in {file})")]
    MissingWorksheet { file: String, sheet: String },

    #[error("ファイルを読み込めません: {0}")]
    UnreadableFile(String),

    #[error("ワークブック読み込みエラー: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("有効なレコードがありません（{} 件のファイルエラー）", .0.len())]
    NoValidRecords(Vec<crate::pipeline::FileError>),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] checklist_common::Error),
}

impl From<rust_xlsxwriter::XlsxError> for ChecklistError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ChecklistError::ExcelGeneration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChecklistError>;
