//! Version-pinned upstream metadata
//!
//! Endpoint paths and flag tables the web GraphQL API expects on every call.
//! They are tied to the query ids below: when upstream rotates a query id the
//! matching flags usually change with it, and the whole table is replaced.
//! Nothing in here is interpreted by the client, it is sent verbatim.

pub const DEFAULT_BASE_URL: &str = "https://twitter.com";

pub const FOLLOWING_PATH: &str = "/i/api/graphql/g5P4cbXR4ta4oCeE7y2vLQ/Following";
pub const FOLLOWERS_PATH: &str = "/i/api/graphql/jwbfbSzn0FRL_AMZGsYDag/Followers";
pub const USER_BY_SCREEN_NAME_PATH: &str =
    "/i/api/graphql/G3KGOASz96M-Qu0nwmGXNg/UserByScreenName";

pub const FRIENDSHIP_CREATE_PATH: &str = "/i/api/1.1/friendships/create.json";
pub const FRIENDSHIP_DESTROY_PATH: &str = "/i/api/1.1/friendships/destroy.json";

/// Upper bound the list endpoints accept for `count`
pub const MAX_PAGE_SIZE: u32 = 200;

/// Capability flags for the Following and Followers queries
pub const FOLLOW_LIST_FEATURES: &[(&str, bool)] = &[
    ("responsive_web_graphql_exclude_directive_enabled", true),
    ("verified_phone_label_enabled", false),
    ("creator_subscriptions_tweet_preview_api_enabled", true),
    ("responsive_web_graphql_timeline_navigation_enabled", true),
    ("responsive_web_graphql_skip_user_profile_image_extensions_enabled", false),
    ("c9s_tweet_anatomy_moderator_badge_enabled", true),
    ("tweetypie_unmention_optimization_enabled", true),
    ("responsive_web_edit_tweet_api_enabled", true),
    ("graphql_is_translatable_rweb_tweet_is_translatable_enabled", true),
    ("view_counts_everywhere_api_enabled", true),
    ("longform_notetweets_consumption_enabled", true),
    ("responsive_web_twitter_article_tweet_consumption_enabled", true),
    ("tweet_awards_web_tipping_enabled", false),
    ("freedom_of_speech_not_reach_fetch_enabled", true),
    ("standardized_nudges_misinfo", true),
    ("tweet_with_visibility_results_prefer_gql_limited_actions_policy_enabled", true),
    ("rweb_video_timestamps_enabled", true),
    ("longform_notetweets_rich_text_read_enabled", true),
    ("longform_notetweets_inline_media_enabled", true),
    ("responsive_web_enhance_cards_enabled", false),
];

/// Capability flags for the UserByScreenName query
pub const USER_LOOKUP_FEATURES: &[(&str, bool)] = &[
    ("hidden_profile_likes_enabled", true),
    ("hidden_profile_subscriptions_enabled", true),
    ("responsive_web_graphql_exclude_directive_enabled", true),
    ("verified_phone_label_enabled", false),
    ("subscriptions_verification_info_is_identity_verified_enabled", true),
    ("subscriptions_verification_info_verified_since_enabled", true),
    ("highlights_tweets_tab_ui_enabled", true),
    ("creator_subscriptions_tweet_preview_api_enabled", true),
    ("responsive_web_graphql_skip_user_profile_image_extensions_enabled", false),
    ("responsive_web_graphql_timeline_navigation_enabled", true),
];

/// Context flags the friendship endpoints require on every mutation
pub const FRIENDSHIP_FLAGS: &[(&str, &str)] = &[
    ("include_profile_interstitial_type", "1"),
    ("include_blocking", "1"),
    ("include_blocked_by", "1"),
    ("include_followed_by", "1"),
    ("include_want_retweets", "1"),
    ("include_mute_edge", "1"),
    ("include_can_dm", "1"),
    ("include_can_media_tag", "1"),
    ("include_ext_is_blue_verified", "1"),
    ("include_ext_verified_type", "1"),
    ("include_ext_profile_image_shape", "1"),
    ("skip_status", "1"),
];
