use crate::{error, info, success};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAction {
    Follow,
    Unfollow,
    Check,
}

pub async fn follow(user_id: String, action: FollowAction) {
    let client = super::load_client().await;

    match action {
        FollowAction::Check => match client.is_following_user(&user_id).await {
            Ok(true) => info!("You follow {}", user_id),
            Ok(false) => info!("You do not follow {}", user_id),
            Err(e) => error!("Cannot check follow state for {}: {}", user_id, e),
        },
        FollowAction::Follow => match client.follow_user(&user_id).await {
            Ok(()) => success!("Now following {}", user_id),
            Err(e) => error!("Cannot follow {}: {}", user_id, e),
        },
        FollowAction::Unfollow => match client.unfollow_user(&user_id).await {
            Ok(()) => success!("Unfollowed {}", user_id),
            Err(e) => error!("Cannot unfollow {}: {}", user_id, e),
        },
    }
}
