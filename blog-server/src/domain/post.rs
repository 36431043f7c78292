use bson::oid::ObjectId;
use bson::Document;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Author name as it is persisted: a `{firstName, lastName}` sub-document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Flattened `"firstName lastName"` form used on the wire. Parts are trimmed
    /// and empty parts are skipped.
    pub fn display_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Reverses [`Author::display_name`]: the first word is the first name,
    /// everything after the first whitespace run is the last name.
    ///
    /// Padding and the whitespace run between the two names are not kept, so
    /// `from_display_name(s).display_name()` is `s` with those normalised to
    /// single spaces. Whitespace inside the last name is kept as is.
    pub fn from_display_name(name: &str) -> Self {
        let name = name.trim();
        match name.split_once(char::is_whitespace) {
            Some((first, last)) => Self::new(first, last.trim_start()),
            None => Self::new(name, ""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    pub author: Author,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created: DateTime<Utc>,
}

impl Post {
    pub fn new(new_post: NewPost) -> Self {
        Self {
            id: ObjectId::new(),
            title: new_post.title,
            content: new_post.content,
            author: new_post.author,
            // BSON datetimes only keep milliseconds
            created: Utc::now().trunc_subsecs(3),
        }
    }

    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
    }
}

/// A post that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: Author,
}

/// Partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none()
    }

    /// Builds the body of a `$set` update for the supplied fields only.
    pub fn to_set_document(&self) -> Result<Document, bson::ser::Error> {
        let mut set = Document::new();
        if let Some(title) = &self.title {
            set.insert("title", title.as_str());
        }
        if let Some(content) = &self.content {
            set.insert("content", content.as_str());
        }
        if let Some(author) = &self.author {
            set.insert("author", bson::to_bson(author)?);
        }
        Ok(set)
    }
}

/// Author as accepted in request bodies: either the `{firstName, lastName}`
/// object or an already flattened string.
#[derive(Debug, Clone)]
pub enum AuthorInput {
    Name(Author),
    Display(String),
}

impl<'de> Deserialize<'de> for AuthorInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(name) => Ok(AuthorInput::Display(name)),
            value @ serde_json::Value::Object(_) => serde_json::from_value(value)
                .map(AuthorInput::Name)
                .map_err(|e| de::Error::custom(format!("invalid `author` object: {}", e))),
            other => Err(de::Error::custom(format!(
                "`author` must be a string or an object with `firstName` and `lastName`, got {}",
                other
            ))),
        }
    }
}

impl From<AuthorInput> for Author {
    fn from(input: AuthorInput) -> Self {
        match input {
            AuthorInput::Name(author) => author,
            AuthorInput::Display(name) => Author::from_display_name(&name),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorInput>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_hex(),
            author: post.author.display_name(),
            title: post.title,
            content: post.content,
            created: post.created,
        }
    }
}
