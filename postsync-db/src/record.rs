use postsync_common::model::{ModelValidationError, post::Post};
use sqlx::FromRow;

/// A row of `posts`. The schema leaves every non-key column nullable.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, FromRow)]
pub(crate) struct PostRecord {
    pub id: u32,
    #[sqlx(rename = "userId")]
    pub user_id: Option<i32>,
    pub title: Option<String>,
    pub body: Option<String>,
}

impl TryFrom<PostRecord> for Post {
    type Error = ModelValidationError;

    fn try_from(value: PostRecord) -> Result<Self, Self::Error> {
        let id = i64::from(value.id);
        let missing = |column| ModelValidationError::NullColumn { id, column };

        Ok(Self {
            id: id.into(),
            user_id: value.user_id.ok_or_else(|| missing("userId"))?.into(),
            title: value.title.ok_or_else(|| missing("title"))?,
            body: value.body.ok_or_else(|| missing("body"))?,
        })
    }
}
