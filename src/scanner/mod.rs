use crate::error::{LegalAiError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 拡張子から判定した文書の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
    Image,
}

impl DocumentKind {
    /// 拡張子（大文字小文字は区別しない）から判定。未対応ならNone
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" | "doc" => Some(DocumentKind::Word),
            "png" | "jpg" | "jpeg" => Some(DocumentKind::Image),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub path: PathBuf,
    pub file_name: String,
    pub kind: DocumentKind,
}

/// フォルダ配下（サブフォルダ含む）の対応文書を列挙する
pub fn scan_folder(folder: &Path) -> Result<Vec<DocumentInfo>> {
    if !folder.is_dir() {
        return Err(LegalAiError::FolderNotFound(folder.display().to_string()));
    }

    let mut documents = Vec::new();

    for entry in WalkDir::new(folder)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let Some(kind) = DocumentKind::from_path(path) else {
            tracing::debug!("未対応の形式をスキップ: {}", path.display());
            continue;
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        documents.push(DocumentInfo {
            path: path.to_path_buf(),
            file_name,
            kind,
        });
    }

    // パスでソート
    documents.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    #[test]
    fn test_document_kind_from_path() {
        assert_eq!(DocumentKind::from_path(Path::new("a.pdf")), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_path(Path::new("a.PDF")), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_path(Path::new("a.docx")), Some(DocumentKind::Word));
        assert_eq!(DocumentKind::from_path(Path::new("a.doc")), Some(DocumentKind::Word));
        assert_eq!(DocumentKind::from_path(Path::new("a.JPEG")), Some(DocumentKind::Image));
        assert_eq!(DocumentKind::from_path(Path::new("a.png")), Some(DocumentKind::Image));
        assert_eq!(DocumentKind::from_path(Path::new("a.txt")), None);
        assert_eq!(DocumentKind::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(LegalAiError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir_all(&nested).unwrap();

        File::create(dir.path().join("b.pdf")).unwrap();
        File::create(dir.path().join("a.docx")).unwrap();
        File::create(nested.join("scan.jpg")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();

        let result = scan_folder(dir.path()).unwrap();
        let names: Vec<&str> = result.iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.docx", "b.pdf", "scan.jpg"]);
        assert_eq!(result[2].kind, DocumentKind::Image);
    }
}
