use reqwest::Method;

use crate::{Error, Result, spotify::SpotifyClient};

fn user_params(user_id: &str) -> [(&'static str, String); 2] {
    [("type", "user".to_string()), ("ids", user_id.to_string())]
}

impl SpotifyClient {
    /// GET /me/following/contains
    pub async fn is_following_user(&self, user_id: &str) -> Result<bool> {
        let answer: Vec<bool> = self
            .get("/me/following/contains", &user_params(user_id))
            .await?;
        answer.first().copied().ok_or(Error::MissingField("0"))
    }

    /// PUT /me/following
    pub async fn follow_user(&self, user_id: &str) -> Result<()> {
        self.send_empty(Method::PUT, "/me/following", &user_params(user_id))
            .await
    }

    /// DELETE /me/following
    pub async fn unfollow_user(&self, user_id: &str) -> Result<()> {
        self.send_empty(Method::DELETE, "/me/following", &user_params(user_id))
            .await
    }
}
