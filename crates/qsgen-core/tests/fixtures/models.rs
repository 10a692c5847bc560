#![allow(dead_code, non_snake_case, unexpected_cfgs)]

use std::collections::HashMap;
use std::time::SystemTime;

pub type Email = String;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    Active,
    Banned,
}

pub struct Timestamps {
    pub created_at: SystemTime,
    pub updated_at: Option<SystemTime>,
}

/// A registered user.
///
/// gen:qs
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Option<Email>,
    pub status: Status,
    pub age: i32,
    pub is_admin: bool,
    pub r#type: String,
    pub displayName: String,
    pub display_name: String,
    #[cfg_attr(qsgen, qs(column = "user_tags"))]
    pub tags: Vec<String>,
    #[cfg_attr(qsgen, qs(column = "legacy \"score\" \\ v1"))]
    pub score: u8,
    pub profile: Option<Profile>,
    pub posts: Vec<Post>,
    #[cfg_attr(qsgen, qs(embed))]
    pub timestamps: Timestamps,
    #[cfg_attr(qsgen, qs(skip))]
    pub cache: String,
    password_hash: String,
    pub metadata: HashMap<String, String>,
}

/// gen:qs
pub struct Profile {
    pub bio: Option<String>,
}

/// gen:qs
pub struct Post {
    pub title: Box<str>,
}

#[path = "models_queryset.rs"]
mod queryset;
pub use queryset::*;
