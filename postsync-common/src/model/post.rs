use crate::model::{Id, user::UserMarker};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use thiserror::Error;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Id<PostMarker>,
    pub user_id: Id<UserMarker>,
    pub title: String,
    pub body: String,
}

/// A post that has not been stored yet.
///
/// Records of the external feed deserialize into this directly; their own
/// `id` is dropped since the database assigns one.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    #[serde(deserialize_with = "deserialize_user_id")]
    pub user_id: Id<UserMarker>,
    pub title: String,
    pub body: String,
}

/// Create input as the client sent it, before validation.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostDraft {
    pub user_id: Option<Id<UserMarker>>,
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum InvalidPostError {
    #[error("userId, title and body are required (missing {0})")]
    MissingField(&'static str),
    #[error("userId {0} does not fit a 32-bit integer")]
    UserIdOutOfRange(i64),
}

/// Owner ids are stored in a signed 32-bit column.
#[must_use]
pub fn user_id_fits_column(user_id: Id<UserMarker>) -> bool {
    i32::try_from(user_id.get()).is_ok()
}

fn deserialize_user_id<'de, D>(deserializer: D) -> Result<Id<UserMarker>, D::Error>
where
    D: Deserializer<'de>,
{
    let user_id = Id::deserialize(deserializer)?;
    if user_id_fits_column(user_id) {
        Ok(user_id)
    } else {
        Err(D::Error::invalid_value(
            Unexpected::Signed(user_id.get()),
            &"a 32-bit userId",
        ))
    }
}

impl TryFrom<PostDraft> for NewPost {
    type Error = InvalidPostError;

    fn try_from(value: PostDraft) -> Result<Self, Self::Error> {
        let user_id = value
            .user_id
            .filter(|id| id.get() != 0)
            .ok_or(InvalidPostError::MissingField("userId"))?;
        if !user_id_fits_column(user_id) {
            return Err(InvalidPostError::UserIdOutOfRange(user_id.get()));
        }
        let title = value
            .title
            .filter(|title| !title.is_empty())
            .ok_or(InvalidPostError::MissingField("title"))?;
        let body = value
            .body
            .filter(|body| !body.is_empty())
            .ok_or(InvalidPostError::MissingField("body"))?;

        Ok(Self {
            user_id,
            title,
            body,
        })
    }
}
