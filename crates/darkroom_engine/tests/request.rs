use darkroom_engine::{encode_bytes, JobRequest, Mode, ValidationError, OUTPUT_FORMAT};
use pretty_assertions::assert_eq;

fn images(count: usize) -> Vec<darkroom_engine::EncodedImage> {
    (0..count)
        .map(|i| encode_bytes(&[i as u8; 4], "image/png"))
        .collect()
}

#[test]
fn edit_request_keeps_image_order_and_array_shape() {
    let encoded = images(3);
    let expected: Vec<String> = encoded.iter().map(|img| img.as_str().to_string()).collect();

    let request = JobRequest::build(Mode::Edit, "make it black and white", encoded).unwrap();
    assert_eq!(request.image_count(), Some(3));

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["prompt"], "make it black and white");
    let list = value["image_input"].as_array().unwrap();
    assert_eq!(list.len(), 3);
    for (i, item) in list.iter().enumerate() {
        assert_eq!(item.as_str().unwrap(), expected[i]);
    }
}

#[test]
fn single_image_still_serializes_as_an_array() {
    let request = JobRequest::build(Mode::Edit, "p", images(1)).unwrap();
    let value = serde_json::to_value(&request).unwrap();
    assert!(value["image_input"].is_array());
    assert_eq!(value["image_input"].as_array().unwrap().len(), 1);
}

#[test]
fn generate_request_pins_the_output_format() {
    let request = JobRequest::build(Mode::Generate, "a tiger in a city", Vec::new()).unwrap();
    assert_eq!(request.image_count(), None);

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["prompt"], "a tiger in a city");
    assert_eq!(value["output_format"], OUTPUT_FORMAT);
    assert!(value.get("image_input").is_none());
}

#[test]
fn prompt_is_trimmed() {
    let request = JobRequest::build(Mode::Generate, "  spaced out  ", Vec::new()).unwrap();
    assert_eq!(request.prompt(), "spaced out");
}

#[test]
fn empty_prompt_wins_over_missing_images() {
    assert_eq!(
        JobRequest::build(Mode::Edit, "   ", Vec::new()),
        Err(ValidationError::EmptyPrompt)
    );
    assert_eq!(
        JobRequest::build(Mode::Edit, "prompt", Vec::new()),
        Err(ValidationError::NoImage)
    );
}

#[test]
fn generate_ignores_leftover_images() {
    let request = JobRequest::build(Mode::Generate, "prompt", images(2)).unwrap();
    assert_eq!(request.mode(), Mode::Generate);
    assert_eq!(request.image_count(), None);
}
