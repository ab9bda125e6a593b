use deckmatch::config::Settings;
use deckmatch::core::evaluator::{DemoLikeLookup, LikeIndex, LikeLookup};
use deckmatch::models::{
    AgeRange, FeedEvent, Location, Personality, Profile, SocialStyle, UserPreferences,
};
use deckmatch::services::store::{DecisionEntry, JsonFileStore, StoredState, SwipeStore};
use deckmatch::{FeedSession, MatchEvaluator, SessionOptions};
use tracing::{error, info};

/// Demo runner: wires configuration, logging and the state store, then
/// drives a short simulated feed session against a built-in candidate list.
fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting deckmatch demo session...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    // Restore persisted swipe state; corruption reads as a fresh start
    let store = JsonFileStore::new(&settings.store.path);
    let stored = store.load();
    info!(
        "Restored state: {} liked, {} passed, unlimited={}",
        stored.liked.len(),
        stored.passed.len(),
        stored.unlimited
    );

    // Mutual-like source: the real index, or the demo draw when configured
    let likes: Box<dyn LikeLookup + Send + Sync> =
        match settings.matching.demo_match_probability {
            Some(p) => {
                info!("Using demo match draw with probability {}", p);
                Box::new(DemoLikeLookup::new(p))
            }
            None => {
                let mut index = LikeIndex::new();
                // Seeded likes of the viewer, standing in for the backend's records
                index.insert("priya", "viewer");
                Box::new(index)
            }
        };

    let viewer = UserPreferences {
        interests: vec!["Travel".to_string(), "Yoga".to_string(), "Food".to_string()],
        personality: Personality {
            social: Some(SocialStyle::Ambivert),
            ..Default::default()
        },
        location: Some(Location {
            latitude: 19.0760,
            longitude: 72.8777,
            city: Some("Mumbai".to_string()),
        }),
        age_range: Some(AgeRange { min: 22, max: 35 }),
        max_distance_km: Some(100),
        ..Default::default()
    };

    let options = SessionOptions {
        weights: settings.scoring.weights.clone().into(),
        thresholds: settings.gesture.clone().into(),
        daily_limit: Some(settings.quota.daily_limit),
        quota: stored.quota,
        decisions: stored.decision_log(),
        blocked: stored.blocked_ids(),
        reported: stored.reported_ids(),
        unlimited: stored.unlimited,
    };

    let mut session = FeedSession::new(viewer, MatchEvaluator::new("viewer", likes), options);

    let deck_size = match session.load_deck(sample_candidates(), None) {
        Ok(n) => n,
        Err(e) => {
            error!("Candidate catalog is invalid: {}", e);
            return;
        }
    };
    info!("Deck loaded with {} candidates", deck_size);
    for candidate in session.deck() {
        info!(
            "  {} ({}): score {} {:?}",
            candidate.profile.name,
            candidate.profile.id,
            candidate.result.score,
            candidate.result.reasons
        );
    }

    // Swipe right on the top card, then left on the next
    run_swipe(&mut session, 1.0);
    run_swipe(&mut session, -1.0);

    for event in session.drain_events() {
        match event {
            FeedEvent::Decision(d) => info!("Decision: {:?} {}", d.kind, d.candidate_id),
            FeedEvent::Match(m) if m.matched => info!("It's a match with {}!", m.candidate_id),
            FeedEvent::Match(m) => info!("Liked {} (no match yet)", m.candidate_id),
            FeedEvent::QuotaExhausted => info!("Daily like quota exhausted"),
        }
    }

    // Persist what the session accumulated
    let now = chrono::Utc::now();
    let state = StoredState {
        liked: session
            .decisions()
            .liked()
            .iter()
            .map(|id| DecisionEntry { id: id.clone(), at: now })
            .collect(),
        passed: session
            .decisions()
            .passed()
            .iter()
            .map(|id| DecisionEntry { id: id.clone(), at: now })
            .collect(),
        blocked: stored.blocked,
        reported: stored.reported,
        quota: Some(session.quota_state()),
        unlimited: stored.unlimited,
    };
    if let Err(e) = store.save(&state) {
        error!("Failed to save state: {}", e);
    } else {
        info!("State saved to {}", settings.store.path);
    }
}

/// Drag the top card past the commit threshold and run the animation out
fn run_swipe(session: &mut FeedSession, direction: f64) {
    let Some(current) = session.current() else {
        info!("Deck exhausted");
        return;
    };
    info!("Swiping {} on {}", if direction > 0.0 { "right" } else { "left" }, current.profile.id);

    session.pointer_down(0.0, 0);
    session.pointer_move(direction * 60.0, 80);
    session.pointer_move(direction * 130.0, 160);
    let timers = session.pointer_up();
    for timer in timers {
        session.timer_fired(timer.token);
    }
}

fn sample_candidates() -> Vec<Profile> {
    vec![
        Profile {
            id: "priya".to_string(),
            name: "Priya".to_string(),
            age: 27,
            gender: Some("female".to_string()),
            photos: vec!["priya-1".to_string(), "priya-2".to_string()],
            bio: "Weekend treks and street food.".to_string(),
            interests: vec!["Travel".to_string(), "Food".to_string()],
            personality: Personality {
                social: Some(SocialStyle::Ambivert),
                ..Default::default()
            },
            location: Some(Location {
                latitude: 19.2183,
                longitude: 72.9781,
                city: Some("Thane".to_string()),
            }),
            dealbreakers: Default::default(),
            attributes: Default::default(),
        },
        Profile {
            id: "meera".to_string(),
            name: "Meera".to_string(),
            age: 30,
            gender: Some("female".to_string()),
            photos: vec!["meera-1".to_string()],
            bio: "Yoga teacher.".to_string(),
            interests: vec!["Yoga".to_string()],
            personality: Default::default(),
            location: Some(Location {
                latitude: 18.9220,
                longitude: 72.8347,
                city: Some("Mumbai".to_string()),
            }),
            dealbreakers: Default::default(),
            attributes: Default::default(),
        },
        Profile {
            id: "ananya".to_string(),
            name: "Ananya".to_string(),
            age: 25,
            gender: Some("female".to_string()),
            photos: vec![],
            bio: String::new(),
            interests: vec!["Gaming".to_string()],
            personality: Default::default(),
            location: None,
            dealbreakers: Default::default(),
            attributes: Default::default(),
        },
    ]
}
