#![allow(dead_code)]

use blog_client::{AuthorName, CreatePostRequest, HttpClient};
use blog_server::data::{InMemoryPostRepository, PostRepository};
use blog_server::domain::{Author, NewPost, Post};
use blog_server::infrastructure::config::Config;
use blog_server::infrastructure::logging::init_test_logging;
use blog_server::{Application, RunningServer};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

pub const SEED_COUNT: usize = 10;

const FIRST_NAMES: &[&str] = &["Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Frances"];
const LAST_NAMES: &[&str] = &["Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth", "Allen"];
const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "labore", "magna", "aliqua",
];

const TITLES: &[&str] = &["My first database", "Second Database", "Third Database", "Final approach"];
const CONTENTS: &[&str] = &["What should go here?", "just chunks of text", "Now they are just questions"];
const AUTHORS: &[&str] = &["Bill Kingsley", "Jenny from the Block", "Arthur Pendragon"];

/// Random sample data. Set `TEST_SEED` to replay a failing run.
pub struct Fixtures {
    rng: StdRng,
}

impl Fixtures {
    pub fn new() -> Self {
        let seed = std::env::var("TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random::<u64>);
        println!("fixture seed: {}", seed);
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, items: &[&str]) -> String {
        items.choose(&mut self.rng).copied().unwrap_or_default().to_string()
    }

    fn words(&mut self, count: usize) -> String {
        (0..count)
            .map(|_| self.pick(WORDS))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn sentence(&mut self) -> String {
        let len = self.rng.gen_range(3..8);
        let mut sentence = self.words(len);
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }

    pub fn text(&mut self) -> String {
        let sentences = self.rng.gen_range(2..5);
        (0..sentences)
            .map(|_| self.sentence())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Persisted-shape post, as seeded straight into the store.
    pub fn new_post(&mut self) -> NewPost {
        NewPost {
            author: Author::new(self.pick(FIRST_NAMES), self.pick(LAST_NAMES)),
            title: self.sentence(),
            content: self.text(),
        }
    }

    /// Request body with a flat author string.
    pub fn blog_post_request(&mut self) -> CreatePostRequest {
        CreatePostRequest {
            title: self.pick(TITLES),
            content: self.pick(CONTENTS),
            author: Some(self.pick(AUTHORS).as_str().into()),
        }
    }

    /// Request body with a structured author.
    pub fn blog_post_request_with_name(&mut self) -> CreatePostRequest {
        CreatePostRequest {
            title: self.pick(TITLES),
            content: self.pick(CONTENTS),
            author: Some(AuthorName::new(self.pick(FIRST_NAMES), self.pick(LAST_NAMES)).into()),
        }
    }
}

pub async fn seed_posts(repo: &dyn PostRepository, fixtures: &mut Fixtures, count: usize) -> Vec<Post> {
    let posts = (0..count).map(|_| fixtures.new_post()).collect();
    repo.insert_many(posts).await.expect("Failed to seed posts")
}

pub struct TestApp {
    pub client: HttpClient,
    pub repo: Arc<InMemoryPostRepository>,
    pub fixtures: Fixtures,
    pub seeded: Vec<Post>,
    server: RunningServer,
}

/// Starts the server on a free port over an in-memory store seeded with
/// [`SEED_COUNT`] posts.
pub async fn spawn_app() -> TestApp {
    init_test_logging();

    let repo = Arc::new(InMemoryPostRepository::new());
    let server = Application::with_repository(&Config::in_memory(), repo.clone())
        .expect("Failed to build application")
        .spawn();

    let mut fixtures = Fixtures::new();
    let seeded = seed_posts(repo.as_ref(), &mut fixtures, SEED_COUNT).await;

    TestApp {
        client: HttpClient::new(server.address()),
        repo,
        fixtures,
        seeded,
        server,
    }
}

impl TestApp {
    pub fn address(&self) -> &str {
        self.server.address()
    }

    pub async fn teardown(self) {
        self.repo.clear().await.expect("Failed to clear store");
        self.server.stop().await.expect("Failed to stop server");
    }
}
