use trellis_hmm::{DecodeError, Decoder, TableHmm, TableHmmBuilder};

fn weather_hmm() -> TableHmm<&'static str, &'static str> {
    TableHmmBuilder::new()
        .states(["Rainy", "Sunny"])
        .start("Rainy", 0.6)
        .start("Sunny", 0.4)
        .transition("Rainy", "Rainy", 0.7)
        .transition("Rainy", "Sunny", 0.3)
        .transition("Sunny", "Rainy", 0.4)
        .transition("Sunny", "Sunny", 0.6)
        .emission("Rainy", "walk", 0.1)
        .emission("Rainy", "shop", 0.4)
        .emission("Rainy", "clean", 0.5)
        .emission("Sunny", "walk", 0.6)
        .emission("Sunny", "shop", 0.3)
        .emission("Sunny", "clean", 0.1)
        .build()
}

#[test]
fn unknown_symbol_is_a_missing_emission_error() {
    let decoder = Decoder::new(weather_hmm());
    let err = decoder.decode(&["walk", "jog"]).unwrap_err();
    assert_eq!(
        err,
        DecodeError::MissingEmission {
            state: "Rainy".to_string(),
            symbol: "jog".to_string(),
        }
    );
}

#[test]
fn missing_transition_names_both_endpoints() {
    let hmm = TableHmmBuilder::new()
        .states(["Rainy", "Sunny"])
        .start("Rainy", 0.6)
        .start("Sunny", 0.4)
        .transition("Rainy", "Rainy", 0.7)
        // Sunny -> Rainy intentionally absent
        .emission("Rainy", "walk", 0.1)
        .emission("Sunny", "walk", 0.6)
        .build();
    let err = Decoder::new(hmm).decode(&["walk", "walk"]).unwrap_err();
    assert_eq!(
        err,
        DecodeError::MissingTransition {
            from: "Sunny".to_string(),
            to: "Rainy".to_string(),
        }
    );
}

#[test]
fn missing_start_names_the_state() {
    let hmm = TableHmmBuilder::new()
        .states(["Rainy", "Sunny"])
        .start("Rainy", 0.6)
        .emission("Rainy", "walk", 0.1)
        .emission("Sunny", "walk", 0.6)
        .build();
    let err = Decoder::new(hmm).decode(&["walk"]).unwrap_err();
    assert_eq!(
        err,
        DecodeError::MissingStart {
            state: "Sunny".to_string(),
        }
    );
}

#[test]
fn empty_observations_rejected_before_any_lookup() {
    // deliberately empty tables: if any lookup ran first, we would see a
    // missing-key error instead
    let hmm = TableHmmBuilder::<&str, &str>::new()
        .states(["Rainy", "Sunny"])
        .build();
    let observations: [&str; 0] = [];
    let err = Decoder::new(hmm).decode(&observations).unwrap_err();
    assert_eq!(err, DecodeError::EmptyObservations);
}

#[test]
fn empty_state_enumeration_is_rejected() {
    let hmm = TableHmmBuilder::<&str, &str>::new().build();
    let err = Decoder::new(hmm).decode(&["walk"]).unwrap_err();
    assert_eq!(err, DecodeError::EmptyStates);
}

#[test]
fn errors_render_the_missing_key() {
    let decoder = Decoder::new(weather_hmm());
    let err = decoder.decode(&["walk", "jog"]).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("jog"), "message was: {message}");
    assert!(message.contains("Rainy"), "message was: {message}");
}
