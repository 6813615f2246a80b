use std::collections::HashMap;

pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidSortColumn,
    InvalidOrder,
    InvalidTopic,
    InvalidQueryParameters,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::InvalidSortColumn => "Invalid sort column",
            ValidationError::InvalidOrder => "Invalid order",
            ValidationError::InvalidTopic => "Invalid topic",
            ValidationError::InvalidQueryParameters => "Invalid query parameters",
        }
    }
}

// Column names cannot be bound as query parameters, so the sort column is
// an enum and only its own SQL spelling ever reaches the statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    ArticleId,
    Title,
    Author,
    Topic,
    CreatedAt,
    Votes,
    CommentCount,
}

impl SortColumn {
    pub fn parse(raw: &str) -> Result<SortColumn, ValidationError> {
        match raw {
            "article_id" => Ok(SortColumn::ArticleId),
            "title" => Ok(SortColumn::Title),
            "author" => Ok(SortColumn::Author),
            "topic" => Ok(SortColumn::Topic),
            "created_at" => Ok(SortColumn::CreatedAt),
            "votes" => Ok(SortColumn::Votes),
            "comment_count" => Ok(SortColumn::CommentCount),
            _ => Err(ValidationError::InvalidSortColumn),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortColumn::ArticleId => "articles.article_id",
            SortColumn::Title => "articles.title",
            SortColumn::Author => "articles.author",
            SortColumn::Topic => "articles.topic",
            SortColumn::CreatedAt => "articles.created_at",
            SortColumn::Votes => "articles.votes",
            SortColumn::CommentCount => "comment_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Result<SortOrder, ValidationError> {
        match raw.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            _ => Err(ValidationError::InvalidOrder),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub page: i64,
}

impl Pagination {
    pub fn parse(limit: Option<&str>, page: Option<&str>) -> Result<Pagination, ValidationError> {
        let limit = match limit {
            Some(raw) => parse_positive(raw)?,
            None => DEFAULT_LIMIT,
        };
        let page = match page {
            Some(raw) => parse_positive(raw)?,
            None => 1,
        };
        Ok(Pagination { limit, page })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

fn parse_positive(raw: &str) -> Result<i64, ValidationError> {
    match raw.parse::<i64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ValidationError::InvalidQueryParameters),
    }
}

// The fully validated shape of a GET /api/articles request. The topic
// whitelist is passed in by the caller so this stays a pure function over
// the current topic set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub sort: SortColumn,
    pub order: SortOrder,
    pub topic: Option<String>,
    pub pagination: Pagination,
}

impl ArticleQuery {
    pub fn parse(
        params: &HashMap<String, String>,
        topic_slugs: &[String],
    ) -> Result<ArticleQuery, ValidationError> {
        let sort = match params.get("sort_by") {
            Some(raw) => SortColumn::parse(raw)?,
            None => SortColumn::CreatedAt,
        };
        let order = match params.get("order") {
            Some(raw) => SortOrder::parse(raw)?,
            None => SortOrder::Descending,
        };
        let topic = match params.get("topic") {
            Some(slug) if topic_slugs.iter().any(|known| known == slug) => Some(slug.clone()),
            Some(_) => return Err(ValidationError::InvalidTopic),
            None => None,
        };
        let pagination = Pagination::parse(
            params.get("limit").map(String::as_str),
            params.get("page").map(String::as_str),
        )?;
        Ok(ArticleQuery {
            sort,
            order,
            topic,
            pagination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn slugs() -> Vec<String> {
        vec!["mitch".to_string(), "cats".to_string()]
    }

    #[test]
    fn every_listed_sort_column_parses() {
        for raw in [
            "article_id",
            "title",
            "author",
            "topic",
            "created_at",
            "votes",
            "comment_count",
        ] {
            assert!(SortColumn::parse(raw).is_ok(), "{raw} should be sortable");
        }
    }

    #[test]
    fn unlisted_sort_column_is_rejected() {
        assert_eq!(
            SortColumn::parse("article_img_url"),
            Err(ValidationError::InvalidSortColumn)
        );
        assert_eq!(
            SortColumn::parse("votes; DROP TABLE articles"),
            Err(ValidationError::InvalidSortColumn)
        );
    }

    #[test]
    fn order_is_case_insensitive() {
        assert_eq!(SortOrder::parse("ASC"), Ok(SortOrder::Ascending));
        assert_eq!(SortOrder::parse("Desc"), Ok(SortOrder::Descending));
        assert_eq!(SortOrder::parse("sideways"), Err(ValidationError::InvalidOrder));
    }

    #[test]
    fn pagination_defaults_apply_when_absent() {
        let pagination = Pagination::parse(None, None).unwrap();
        assert_eq!(pagination.limit, DEFAULT_LIMIT);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn pagination_offset_skips_earlier_pages() {
        let pagination = Pagination::parse(Some("5"), Some("3")).unwrap();
        assert_eq!(pagination.offset(), 10);
    }

    #[test]
    fn pagination_rejects_non_positive_and_non_numeric() {
        for (limit, page) in [
            (Some("0"), None),
            (Some("-1"), None),
            (Some("banana"), None),
            (None, Some("0")),
            (None, Some("-1")),
            (None, Some("two")),
        ] {
            assert_eq!(
                Pagination::parse(limit, page),
                Err(ValidationError::InvalidQueryParameters)
            );
        }
    }

    #[test]
    fn article_query_defaults_to_newest_first() {
        let query = ArticleQuery::parse(&params(&[]), &slugs()).unwrap();
        assert_eq!(query.sort, SortColumn::CreatedAt);
        assert_eq!(query.order, SortOrder::Descending);
        assert_eq!(query.topic, None);
    }

    #[test]
    fn article_query_accepts_known_topic() {
        let query = ArticleQuery::parse(&params(&[("topic", "cats")]), &slugs()).unwrap();
        assert_eq!(query.topic, Some("cats".to_string()));
    }

    #[test]
    fn article_query_rejects_unknown_topic() {
        assert_eq!(
            ArticleQuery::parse(&params(&[("topic", "ghost")]), &slugs()),
            Err(ValidationError::InvalidTopic)
        );
    }

    #[test]
    fn article_query_surfaces_first_invalid_parameter() {
        assert_eq!(
            ArticleQuery::parse(&params(&[("sort_by", "nope"), ("order", "nope")]), &slugs()),
            Err(ValidationError::InvalidSortColumn)
        );
        assert_eq!(
            ArticleQuery::parse(&params(&[("order", "nope")]), &slugs()),
            Err(ValidationError::InvalidOrder)
        );
    }
}
