use lazyassist_core::nlp::intent::{CURRENT_LOCATION, GENERAL_TOPIC};
use lazyassist_core::{classify, Classification, Intent};

fn task(title: &str, deadline: Option<&str>) -> Classification {
    Classification::AddTask {
        title: title.to_string(),
        deadline: deadline.map(str::to_string),
    }
}

#[test]
fn task_phrasing_with_weekday_deadline() {
    assert_eq!(
        classify("add a task to do called buy milk by friday"),
        task("buy milk", Some("friday"))
    );
}

#[test]
fn task_phrasings_extract_titles() {
    assert_eq!(classify("add task buy eggs"), task("buy eggs", None));
    assert_eq!(
        classify("Create task called Finish report due March 5th"),
        task("finish report", Some("march 5th"))
    );
    assert_eq!(
        classify("I need to call the bank at 10:30"),
        task("call the bank", Some("10:30"))
    );
}

#[test]
fn unresolvable_deadline_text_is_still_captured_raw() {
    assert_eq!(
        classify("add task pay rent due someday"),
        task("pay rent", Some("someday"))
    );
}

#[test]
fn remind_me_to_is_claimed_by_the_task_group() {
    assert_eq!(
        classify("remind me to call mom at 5pm"),
        task("call mom at 5pm", None)
    );
}

#[test]
fn reminder_phrasings_capture_title_and_time() {
    assert_eq!(
        classify("remind me about the dentist on friday"),
        Classification::AddReminder {
            title: "the dentist".to_string(),
            time: "friday".to_string(),
        }
    );
    assert_eq!(
        classify("Set a reminder for standup at 9:30am"),
        Classification::AddReminder {
            title: "standup".to_string(),
            time: "9:30am".to_string(),
        }
    );
    assert_eq!(
        classify("remind me the rent is due on may 1"),
        Classification::AddReminder {
            title: "the rent is due".to_string(),
            time: "may 1".to_string(),
        }
    );
}

#[test]
fn weather_location_defaults_to_placeholder() {
    assert_eq!(
        classify("what's the weather in Paris"),
        Classification::Weather {
            location: "paris".to_string()
        }
    );
    assert_eq!(
        classify("how is the weather like"),
        Classification::Weather {
            location: CURRENT_LOCATION.to_string()
        }
    );
    assert_eq!(
        classify("weather for tokyo"),
        Classification::Weather {
            location: "tokyo".to_string()
        }
    );
}

#[test]
fn news_topic_defaults_to_general() {
    assert_eq!(
        classify("what's the news about technology"),
        Classification::News {
            topic: "technology".to_string()
        }
    );
    assert_eq!(
        classify("latest news on sports"),
        Classification::News {
            topic: "sports".to_string()
        }
    );
    assert_eq!(
        classify("tell me the news"),
        Classification::News {
            topic: GENERAL_TOPIC.to_string()
        }
    );
}

#[test]
fn question_lead_words_keep_full_command() {
    assert_eq!(
        classify("  Can you help me plan my week? "),
        Classification::Question {
            query: "can you help me plan my week?".to_string()
        }
    );
    assert_eq!(classify("is it going to rain").intent(), Intent::Question);
    assert_eq!(classify("who are you").intent(), Intent::Question);
}

#[test]
fn unmatched_command_is_unknown_and_normalized() {
    assert_eq!(
        classify("xyz nonsense"),
        Classification::Unknown {
            original_command: "xyz nonsense".to_string()
        }
    );
    assert_eq!(
        classify("  Play Some MUSIC  "),
        Classification::Unknown {
            original_command: "play some music".to_string()
        }
    );
    assert_eq!(classify("").intent(), Intent::Unknown);
}

#[test]
fn classification_serializes_with_intent_tag() {
    let value = serde_json::to_value(classify("add a task to do called buy milk by friday")).unwrap();
    assert_eq!(value["intent"], "add_task");
    assert_eq!(value["title"], "buy milk");
    assert_eq!(value["deadline"], "friday");

    let value = serde_json::to_value(classify("add task buy eggs")).unwrap();
    assert!(value["deadline"].is_null());
}

#[test]
fn classification_is_idempotent() {
    for command in [
        "remind me to call mom at 5pm",
        "what's the weather in Paris",
        "xyz nonsense",
    ] {
        assert_eq!(classify(command), classify(command));
    }
}

#[test]
fn earlier_deadline_phrasing_wins_and_only_it_is_stripped() {
    // Weekday and `H:MM` phrasings both match; the weekday comes first.
    assert_eq!(
        classify("add task ship it by friday at 10:30"),
        task("ship it at 10:30", Some("friday"))
    );
}

#[test]
fn title_made_only_of_the_deadline_is_kept_as_written() {
    assert_eq!(
        classify("add a task by friday"),
        task("by friday", Some("friday"))
    );
}
