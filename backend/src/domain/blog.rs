//! Blog post model.

use std::fmt;

use uuid::Uuid;

use super::user::{User, UserId};

/// Validation errors raised by the blog constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogValidationError {
    /// The identifier was empty or not a UUID.
    InvalidId,
    /// The title was missing or blank once trimmed.
    EmptyTitle,
    /// The url was missing or blank once trimmed.
    EmptyUrl,
    /// The like count was negative.
    NegativeLikes,
}

impl fmt::Display for BlogValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "blog id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyUrl => write!(f, "url must not be empty"),
            Self::NegativeLikes => write!(f, "likes must not be negative"),
        }
    }
}

impl std::error::Error for BlogValidationError {}

/// Stable blog identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlogId(Uuid);

impl BlogId {
    /// Validate and construct a [`BlogId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, BlogValidationError> {
        Uuid::parse_str(id.as_ref().trim())
            .map(Self)
            .map_err(|_| BlogValidationError::InvalidId)
    }

    /// Generate a new random [`BlogId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for BlogId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty blog title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogTitle(String);

impl BlogTitle {
    /// Validate and construct a [`BlogTitle`].
    pub fn new(title: impl Into<String>) -> Result<Self, BlogValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(BlogValidationError::EmptyTitle);
        }
        Ok(Self(title))
    }
}

impl AsRef<str> for BlogTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<BlogTitle> for String {
    fn from(value: BlogTitle) -> Self {
        value.0
    }
}

/// Non-empty blog link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogUrl(String);

impl BlogUrl {
    /// Validate and construct a [`BlogUrl`].
    pub fn new(url: impl Into<String>) -> Result<Self, BlogValidationError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(BlogValidationError::EmptyUrl);
        }
        Ok(Self(url))
    }
}

impl AsRef<str> for BlogUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<BlogUrl> for String {
    fn from(value: BlogUrl) -> Self {
        value.0
    }
}

/// Stored blog post.
///
/// ## Invariants
/// - `title` and `url` are non-empty;
/// - `likes` is non-negative;
/// - `owner` is stamped at creation and never changes afterwards. It decides
///   who may delete the blog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    id: BlogId,
    title: BlogTitle,
    author: Option<String>,
    url: BlogUrl,
    likes: i32,
    owner: UserId,
}

impl Blog {
    /// Build a [`Blog`] from validated components.
    pub fn new(
        id: BlogId,
        title: BlogTitle,
        author: Option<String>,
        url: BlogUrl,
        likes: i32,
        owner: UserId,
    ) -> Self {
        Self {
            id,
            title,
            author,
            url,
            likes,
            owner,
        }
    }

    /// Stable blog identifier.
    pub fn id(&self) -> &BlogId {
        &self.id
    }

    /// Blog title.
    pub fn title(&self) -> &str {
        self.title.as_ref()
    }

    /// Optional author attribution.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Blog link.
    pub fn url(&self) -> &str {
        self.url.as_ref()
    }

    /// Number of likes.
    pub fn likes(&self) -> i32 {
        self.likes
    }

    /// Identifier of the user who created the blog.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }
}

/// Draft of a blog post about to be stored.
#[derive(Debug, Clone)]
pub struct NewBlog {
    /// Blog title.
    pub title: BlogTitle,
    /// Optional author attribution.
    pub author: Option<String>,
    /// Blog link.
    pub url: BlogUrl,
    /// Initial like count.
    pub likes: i32,
    /// Identifier of the creating user, resolved from their token.
    pub owner: UserId,
}

impl NewBlog {
    /// Build a draft, defaulting the like count to zero when absent.
    pub fn new(
        title: BlogTitle,
        author: Option<String>,
        url: BlogUrl,
        likes: Option<i32>,
        owner: UserId,
    ) -> Result<Self, BlogValidationError> {
        let likes = likes.unwrap_or(0);
        if likes < 0 {
            return Err(BlogValidationError::NegativeLikes);
        }
        Ok(Self {
            title,
            author,
            url,
            likes,
            owner,
        })
    }
}

/// Partial update applied to a stored blog.
///
/// Absent fields are left unchanged. Provided fields replace the stored
/// values; the owner is never touched.
#[derive(Debug, Clone, Default)]
pub struct BlogUpdate {
    /// Replacement title, when provided.
    pub title: Option<BlogTitle>,
    /// Replacement author attribution, when provided.
    pub author: Option<String>,
    /// Replacement link, when provided.
    pub url: Option<BlogUrl>,
    /// Replacement like count, when provided.
    pub likes: Option<i32>,
}

impl BlogUpdate {
    /// Whether the update changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.url.is_none() && self.likes.is_none()
    }
}

/// A blog together with its resolved owner, as returned by the blogs listing.
#[derive(Debug, Clone)]
pub struct BlogWithOwner {
    /// The blog post.
    pub blog: Blog,
    /// The account that created it.
    pub owner: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft_parts() -> (BlogTitle, BlogUrl, UserId) {
        let title = BlogTitle::new("Initial Blog One").expect("valid title");
        let url = BlogUrl::new("google.com").expect("valid url");
        (title, url, UserId::random())
    }

    #[test]
    fn draft_defaults_likes_to_zero() {
        let (title, url, owner) = draft_parts();
        let draft = NewBlog::new(title, None, url, None, owner).expect("valid draft");
        assert_eq!(draft.likes, 0);
    }

    #[test]
    fn draft_rejects_negative_likes() {
        let (title, url, owner) = draft_parts();
        let err = NewBlog::new(title, None, url, Some(-1), owner).expect_err("must fail");
        assert_eq!(err, BlogValidationError::NegativeLikes);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn title_rejects_blank_input(#[case] raw: &str) {
        let err = BlogTitle::new(raw).expect_err("blank title must fail");
        assert_eq!(err, BlogValidationError::EmptyTitle);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn url_rejects_blank_input(#[case] raw: &str) {
        let err = BlogUrl::new(raw).expect_err("blank url must fail");
        assert_eq!(err, BlogValidationError::EmptyUrl);
    }

    #[test]
    fn empty_update_reports_itself() {
        assert!(BlogUpdate::default().is_empty());
        let update = BlogUpdate {
            likes: Some(7),
            ..BlogUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
