use dialogcurator::models::Triple;
use serde_json::{json, Value};

pub fn movie_seed(id: i64) -> Value {
    json!({
        "id": id,
        "original_goal": "[1] Greetings --> [2] Chat about stars (Jet Li) --> [3] Movie recommendation (Hero)",
        "user_profile": {
            "Name": "Li Hua",
            "Gender": "Male",
            "Age Range": "18-25 years old",
            "Residence": "Beijing",
            "Accepted celebrities": "Jet Li; Zhang Ziyi; Tony Leung",
            "Accepted movies": "Fearless",
            "Accepted Music": "Jay Chou",
            "Accepted food": "Noodles",
            "Accepted news": "Jet Li news"
        },
        "knowledge_graph": [
            ["Jet Li", "Intro", "Martial artist and actor"],
            ["Jet Li", "Awards", "Hong Kong Film Award"],
            ["Hero", "Stars", "Jet Li"],
            ["Hero", "Type", "Wuxia"],
            ["Fearless", "Type", "Action"],
            ["Zhang Ziyi", "Birthday", "1979-02-09"],
            ["Red Cliff", "Comments", "A sweeping war epic"]
        ],
        "target": ["Movie recommendation", "Hero"],
        "topic_path": ["NULL", "Jet Li", "Hero"],
        "conversation": ["[1] Hello!", "Hi there.", "Do you like Jet Li?"],
        "action_path": ["Greetings", "Chat about stars", "Movie recommendation"]
    })
}

pub fn food_seed(id: i64) -> Value {
    json!({
        "id": id,
        "original_goal": "[1] Greetings --> [2] Food recommendation (Marinated Fish)",
        "user_profile": {
            "Name": "Wang Fang",
            "Age Range": "36-50",
            "Residence": "Chengdu",
            "Accepted food": "Marinated Fish; Hot Pot",
            "Accepted POI": "Chuan Wei Restaurant",
            "Accepted movies": "Red Cliff"
        },
        "knowledge_graph": [
            ["Marinated Fish", "Specials", "Marinated Fish"],
            ["Chuan Wei Restaurant", "Specials", "Marinated Fish"],
            ["Chuan Wei Restaurant", "Rating", "4.5"],
            ["Hot Pot", "Price per person", "120"]
        ],
        "target": ["Food recommendation", "Marinated Fish"],
        "topic_path": ["Marinated Fish"],
        "conversation": ["Good evening.", "Evening!"],
        "action_path": ["Greetings", "Food recommendation"]
    })
}

/// A seed whose action names no domain.
pub fn chitchat_seed(id: i64) -> Value {
    let mut seed = movie_seed(id);
    seed["target"] = json!(["Chit-chat about celebrities", "Jet Li"]);
    seed
}

pub fn triple(subject: &str, relation: &str, object: &str) -> Triple {
    Triple::new(subject, relation, object)
}
