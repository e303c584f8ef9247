//! Prompt construction for itinerary requests.

use sha2::{Digest, Sha256};

use crate::message::ChatMessage;
use crate::trip::TripRequest;

/// Build the system instruction for an itinerary request.
pub fn system_prompt(request: &TripRequest) -> String {
    format!(
        "You are a professional travel planner. Create a detailed {days}-day itinerary for a trip.\n\
         Output in Markdown only. For each day include sections: Morning, Afternoon, Evening. \
         Provide 1-3 activities per section, each with a 1-2 sentence explanation.\n\
         Information:\n\
         - Origin: {origin}\n\
         - Destination: {destination}\n\
         - Dates: {start} to {end}\n\
         - Interests: {interests}\n\
         - Pace: {pace} (relaxed/normal/tight)\n",
        days = request.length(),
        origin = request.origin,
        destination = request.destination,
        start = request.start_date,
        end = request.end_date,
        interests = request.interests_joined(),
        pace = request.pace,
    )
}

/// Build the user instruction restating the request in plain language.
pub fn user_prompt(request: &TripRequest) -> String {
    format!(
        "Generate a {days}-day itinerary for a trip from {origin} to {destination} from {start} to {end}. \
         Interests: {interests}. Pace: {pace}. \
         Include morning/afternoon/evening plans each day with short explanations.",
        days = request.length(),
        origin = request.origin,
        destination = request.destination,
        start = request.start_date,
        end = request.end_date,
        interests = request.interests_joined(),
        pace = request.pace,
    )
}

/// The two-message conversation sent for an itinerary: system, then user.
///
/// Earlier conversation turns are never included.
pub fn itinerary_conversation(request: &TripRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt(request)),
        ChatMessage::user(user_prompt(request)),
    ]
}

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}
