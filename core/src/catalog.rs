//! Ready-made game definitions covering each interaction mode. Hosts
//! normally ship their own content; these double as reference decks and
//! fixture data for integration work.

use alloc::vec;
use alloc::vec::Vec;

use crate::*;

/// Continue-the-sequence pattern game. Rewards grow with level difficulty.
pub fn spot_the_pattern() -> GameDefinition {
    let deck = LevelDeck::from_levels(vec![
        Level::new(
            "🟡 🟦 🟡 🟦 …?",
            [Answer::emoji("🔺"), Answer::emoji("🟡"), Answer::emoji("🟦")],
            Answer::emoji("🟡"),
            10,
        ),
        Level::new(
            "⭐ 💙 ⭐ 💙 …?",
            [Answer::emoji("💚"), Answer::emoji("⭐"), Answer::emoji("💛")],
            Answer::emoji("⭐"),
            15,
        ),
        Level::new(
            "🔺 🔺 🟧 🔺 🔺 …?",
            [Answer::emoji("🔺"), Answer::emoji("🟧"), Answer::emoji("🟣")],
            Answer::emoji("🟧"),
            20,
        ),
        Level::new(
            "⬆️ ⬇️ ⬆️ ⬇️ …?",
            [Answer::emoji("⬅️"), Answer::emoji("⬆️"), Answer::emoji("⬇️")],
            Answer::emoji("⬆️"),
            25,
        ),
        Level::new(
            "💗 💗 💗 ⭐ 💗 💗 …?",
            [Answer::emoji("🔵"), Answer::emoji("💗"), Answer::emoji("⭐")],
            Answer::emoji("💗"),
            30,
        ),
    ])
    .expect("pattern deck is well formed");

    GameDefinition {
        info: GameInfo::new(
            "spot-the-pattern",
            Pillar::Ai,
            "Spot The Pattern",
            "Find the next shape in the sequence!",
        ),
        mode: ModeSpec::Quiz { deck, image: None },
    }
}

/// True/false quiz: which of these everyday things use AI?
pub fn ai_or_not() -> GameDefinition {
    let question = |prompt, is_ai| {
        Level::new(
            prompt,
            [Answer::flag(true), Answer::flag(false)],
            Answer::flag(is_ai),
            5,
        )
    };

    let deck = LevelDeck::from_levels(vec![
        question("A voice assistant that answers your questions", true),
        question("A calculator that adds two numbers", false),
        question("A photo app that recognizes your friends' faces", true),
        question("A flashlight you switch on and off", false),
        question("A video site that suggests what to watch next", true),
    ])
    .expect("quiz deck is well formed");

    GameDefinition {
        info: GameInfo::new(
            "ai-or-not",
            Pillar::Ai,
            "AI or Not?",
            "Is it artificial intelligence?",
        ),
        mode: ModeSpec::Quiz { deck, image: None },
    }
}

/// Real-photo-or-not quiz around a randomly fetched dog picture. The host
/// performs the fetch; a failure falls back to the bundled photo.
pub fn real_or_robot_dog() -> GameDefinition {
    let question = |prompt, answer| {
        Level::new(
            prompt,
            [Answer::flag(true), Answer::flag(false)],
            Answer::flag(answer),
            5,
        )
    };

    let deck = LevelDeck::from_levels(vec![
        question("Is this a photo a camera took of a real dog?", true),
        question("Could a computer make a picture that looks like this?", true),
        question("Does the dog in the picture live inside the computer?", false),
        question("Can AI help sort thousands of dog photos quickly?", true),
        question("Did the computer need photos of dogs to learn what a dog is?", true),
    ])
    .expect("quiz deck is well formed");

    GameDefinition {
        info: GameInfo::new(
            "real-or-robot-dog",
            Pillar::Ai,
            "Real or Robot Dog?",
            "Look closely at the picture!",
        ),
        mode: ModeSpec::Quiz {
            deck,
            image: Some(RemoteImage::new(
                "https://dog.ceo/api/breeds/image/random",
                "assets/dog-fallback.jpg",
            )),
        },
    }
}

/// Pool-draining classifier: drag each feeling word to its bucket.
pub fn sort_the_feelings() -> GameDefinition {
    GameDefinition {
        info: GameInfo::new(
            "sort-the-feelings",
            Pillar::Brain,
            "Sort The Feelings",
            "Which words feel good?",
        ),
        mode: ModeSpec::Sort {
            spec: SortSpec::new(
                ["Positive", "Negative"],
                vec![
                    SortItem::new("Hope", "🌟", "Positive", 5),
                    SortItem::new("Grateful", "🙏", "Positive", 5),
                    SortItem::new("Brave", "🦁", "Positive", 5),
                    SortItem::new("Hopeless", "😔", "Negative", 5),
                    SortItem::new("Angry", "😠", "Negative", 5),
                    SortItem::new("Worried", "😰", "Negative", 5),
                ],
            ),
        },
    }
}

/// Timed traffic-light reactions: act on the light showing right now.
pub fn traffic_signals() -> GameDefinition {
    GameDefinition {
        info: GameInfo::new(
            "traffic-signals",
            Pillar::Dcos,
            "Traffic Signals",
            "Watch the light and react!",
        ),
        mode: ModeSpec::Reflex {
            spec: ReflexSpec::new(
                ["stop", "wait", "go"],
                vec![
                    Cue::new("🔴 Red light", "stop", 5),
                    Cue::new("🟡 Yellow light", "wait", 5),
                    Cue::new("🟢 Green light", "go", 5),
                ],
                5,
            ),
        },
    }
}

pub fn all_games() -> Vec<GameDefinition> {
    vec![
        spot_the_pattern(),
        ai_or_not(),
        real_or_robot_dog(),
        sort_the_feelings(),
        traffic_signals(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_game_starts() {
        for definition in all_games() {
            let id = definition.info.id.clone();
            let session = GameSession::start(definition, 1);
            assert!(session.is_ok(), "{id} failed to start");
        }
    }

    #[test]
    fn catalog_ids_are_unique() {
        let games = all_games();
        for (index, game) in games.iter().enumerate() {
            assert!(
                games[..index].iter().all(|other| other.info.id != game.info.id),
                "duplicate id {}",
                game.info.id
            );
        }
    }

    #[test]
    fn pattern_rewards_grow_with_difficulty() {
        let ModeSpec::Quiz { deck, .. } = spot_the_pattern().mode else {
            panic!("expected a quiz");
        };

        let rewards: alloc::vec::Vec<_> = deck.levels().iter().map(|level| level.reward).collect();
        assert_eq!(rewards, [10, 15, 20, 25, 30]);
        assert_eq!(deck.max_score(), 100);
    }

    #[test]
    fn dog_game_waits_for_its_photo() {
        let session = GameSession::start(real_or_robot_dog(), 0).unwrap();
        let quiz = session.as_quiz().unwrap();

        assert_eq!(quiz.state(), QuizState::Loading);
        assert_eq!(quiz.image_url(), None);
    }
}
