use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 記事エンティティ（プロバイダ・カテゴリは名前で保持し、ストレージ表現から独立）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub guid: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub published_date: DateTime<Utc>,
    pub provider: String,
    pub category: String,
}

/// 記事のコレクション
/// 並び順はクエリのソート方向で決まり、取得後に並べ替えない
pub type Articles = Vec<Article>;

// ソート方向（published_date基準）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sorting {
    Asc,
    Desc,
}

impl Default for Sorting {
    fn default() -> Self {
        Self::Desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_article() -> Article {
        Article {
            guid: "g1".to_string(),
            title: "T".to_string(),
            description: "D".to_string(),
            link: "L".to_string(),
            published_date: "2020-05-10T12:30:00Z".parse().unwrap(),
            provider: "BBC".to_string(),
            category: "tech".to_string(),
        }
    }

    #[test]
    fn test_article_json_shape() {
        // HTTP層へ渡すJSON表現のフィールド名と日時形式を検証
        let article = sample_article();
        let json = serde_json::to_value(&article).unwrap();

        assert_eq!(json["guid"], "g1");
        assert_eq!(json["title"], "T");
        assert_eq!(json["description"], "D");
        assert_eq!(json["link"], "L");
        assert_eq!(json["published_date"], "2020-05-10T12:30:00Z");
        assert_eq!(json["provider"], "BBC");
        assert_eq!(json["category"], "tech");

        println!("✅ 記事JSON表現の検証成功");
    }

    #[test]
    fn test_article_json_round_trip() {
        let article = sample_article();
        let json = serde_json::to_string(&article).unwrap();
        let restored: Article = serde_json::from_str(&json).unwrap();

        assert_eq!(article, restored, "JSON往復で記事が変化しました");

        println!("✅ 記事JSON往復検証成功");
    }

    #[test]
    fn test_sorting_serde_values() {
        // クエリパラメータはasc/descの小文字で受け渡す
        assert_eq!(serde_json::to_value(Sorting::Asc).unwrap(), "asc");
        assert_eq!(serde_json::to_value(Sorting::Desc).unwrap(), "desc");

        let sorting: Sorting = serde_json::from_value("desc".into()).unwrap();
        assert_eq!(sorting, Sorting::Desc);
    }
}
