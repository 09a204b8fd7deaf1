//! Almacenamiento en memoria de posts.
//!
//! `DashMap` permite compartir el store entre invocaciones concurrentes sin
//! un lock global; los ids se asignan con un contador atómico.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use log::debug;

use crate::model::Post;

#[derive(Debug)]
pub struct PostStore {
    posts: DashMap<u64, Post>,
    next_id: AtomicU64,
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore {
    pub fn new() -> Self {
        Self { posts: DashMap::new(),
               next_id: AtomicU64::new(1) }
    }

    /// Store con unos pocos posts de ejemplo (autores 1 y 2).
    pub fn seeded() -> Self {
        let store = Self::new();
        for (author_id, title, published) in [(1, "Hello world", true), (1, "Draft notes", false), (2, "Second author", true)] {
            let mut post = Post::draft(author_id);
            post.title = title.to_string();
            post.body = format!("{title}.");
            post.published = published;
            store.insert(post);
        }
        store
    }

    /// Asigna id y guarda. Devuelve el post persistido.
    pub fn insert(&self, mut post: Post) -> Post {
        post.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        debug!("store:insert id={} author={}", post.id, post.author_id);
        self.posts.insert(post.id, post.clone());
        post
    }

    pub fn get(&self, id: u64) -> Option<Post> {
        self.posts.get(&id).map(|entry| entry.value().clone())
    }

    /// Reemplaza un post existente; `None` si el id no existe.
    pub fn update(&self, post: Post) -> Option<Post> {
        let mut slot = self.posts.get_mut(&post.id)?;
        *slot = post.clone();
        debug!("store:update id={}", post.id);
        Some(post)
    }

    /// Todos los posts en orden de id.
    pub fn all(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.iter().map(|entry| entry.value().clone()).collect();
        posts.sort_by_key(|p| p.id);
        posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_assigned_in_sequence() {
        let store = PostStore::new();
        let a = store.insert(Post::draft(1));
        let b = store.insert(Post::draft(1));
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.all().iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn update_requires_an_existing_post() {
        let store = PostStore::new();
        let mut post = store.insert(Post::draft(1));
        post.title = "changed".into();
        assert!(store.update(post.clone()).is_some());
        assert_eq!(store.get(post.id).map(|p| p.title), Some("changed".to_string()));

        let ghost = Post { id: 99, ..Post::draft(1) };
        assert!(store.update(ghost).is_none());
    }

    #[test]
    fn seeded_store_has_sample_posts() {
        let store = PostStore::seeded();
        assert_eq!(store.len(), 3);
        assert!(store.get(2).is_some_and(|p| !p.published));
    }
}
