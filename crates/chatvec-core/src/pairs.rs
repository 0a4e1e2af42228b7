//! Loading the input/output pairs that get embedded.
//!
//! A JSON file (array of `{input, output}` objects) wins when it can be read;
//! otherwise the built-in list is used. A file that exists but does not parse
//! is an error rather than a silent fallback.
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::Pair;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairSource {
    File(PathBuf),
    Builtin,
}

#[derive(Debug, Clone)]
pub struct LoadedPairs {
    pub pairs: Vec<Pair>,
    pub source: PairSource,
}

pub fn load_pairs(path: Option<&Path>) -> Result<LoadedPairs> {
    if let Some(path) = path {
        if let Ok(data) = fs::read_to_string(path) {
            let pairs: Vec<Pair> = serde_json::from_str(&data)
                .map_err(|e| Error::PairsFile { path: path.display().to_string(), message: e.to_string() })?;
            return Ok(LoadedPairs { pairs, source: PairSource::File(path.to_path_buf()) });
        }
    }
    Ok(LoadedPairs { pairs: builtin_pairs(), source: PairSource::Builtin })
}

const BUILTIN: &[(&str, &str)] = &[
    // Booking
    ("Book transport for tomorrow at 8 AM", "Got it! You're scheduling a pickup for tomorrow at 8 AM. Can you confirm your drop location is your office?"),
    ("I want pickup from home at 7:30 AM on Monday", "Perfect! I'm booking your pickup for Monday at 7:30 AM from your home address. Your roster is confirmed! You will receive driver details 30 minutes before the trip."),
    ("Schedule my pickup for 6 PM today", "I've scheduled your pickup for today at 6 PM. Your booking is confirmed and you'll receive driver details shortly."),
    ("Add me to the transport list for tomorrow's night shift", "I've added you to the transport roster for tomorrow's night shift. You'll receive confirmation with driver details 30 minutes before your trip."),
    // Viewing the schedule
    ("Show me my roster for this week", "Here's your upcoming roster:\n• Tomorrow - Pickup at 7:30 AM, Drop at 6 PM\n• Wednesday - Pickup at 8 AM\n• Friday - No Roster"),
    ("Do I have a trip scheduled for tomorrow?", "You have a pickup scheduled tomorrow at 8 AM from your home address."),
    ("What time is my pickup today?", "You have a pickup scheduled today at 6 PM from your home address."),
    ("Show my upcoming transport schedule", "Here are your upcoming trips:\n• Today - Drop at 6 PM\n• Tomorrow - Pickup at 8 AM\n• Thursday - Pickup at 7:30 AM, Drop at 6:30 PM"),
    // Changes
    ("Change my pickup time to 9 AM tomorrow", "I found your roster for tomorrow at 8 AM. I've updated your pickup time to 9 AM. You'll receive updated trip details shortly."),
    ("Reschedule my drop to 7 PM instead of 6", "Your drop-off time has been updated to 7 PM. Updated trip details will be shared with you."),
    ("Edit the time for Monday roster", "You have a roster for Monday at 6 PM. What time would you like to change it to?"),
    // Cancellations
    ("Cancel my transport for tomorrow", "I found a roster for tomorrow at 8 AM. Your transport for tomorrow has been cancelled successfully."),
    ("I won't need pickup on Friday", "Your pickup for Friday has been cancelled."),
    ("I'm working from home tomorrow, cancel the ride", "Done! Your ride for tomorrow has been successfully cancelled."),
    // Help
    ("How do I book a trip?", "I can help you book a transport! Just tell me the date and time. For example: 'Book a pickup for tomorrow at 9 AM' and I'll handle the rest."),
    ("Can I cancel a roster?", "Yes, you can cancel a roster anytime! Just tell me which trip you want to cancel, like 'Cancel my ride for tomorrow' and I'll take care of it."),
    ("What is a roster?", "A roster is your scheduled ride for a specific shift or date. It includes pickup and drop-off times and locations."),
    // Shifts
    ("What are the available login shifts for tomorrow?", "Your login shifts for tomorrow are every 30 minutes starting from 7 AM."),
    ("Show me logout shifts for today", "Logout shifts for today are every 30 minutes starting from 6 PM."),
    ("What shifts are available after 8 AM tomorrow?", "Login shifts are available every 30 minutes starting from 8:10 AM tomorrow."),
    // Multi-day
    ("Book my rides for the entire week", "I can help you book rides for multiple days. What are the start and end dates for your weekly booking?"),
    ("I need transport from Monday to Friday", "I'll book your transport from Monday to Friday. What time would you prefer for your daily rides?"),
    // Underspecified requests
    ("Book", "Can you please specify the date and time for your trip?"),
    ("I need it", "Did you mean to book a ride? Please provide the date and time, like 'Pickup at 7 AM tomorrow'."),
    ("Next week", "I'd be happy to help with next week's transport. Could you specify the exact dates and times you need?"),
    // Live trip status
    ("Where is my cab?", "Your cab (KA01AB1234) is currently 5 minutes away from your pickup location. Driver Ramesh will contact you when he arrives."),
    ("Is my driver here?", "Your cab (KA01AB1234) has arrived at your location. Driver Ramesh is waiting at the pickup point."),
    // Short conversational turns
    ("book my ride for tomorrow", "What time would you like your ride for tomorrow?"),
    ("yes", "What time works for you?"),
    ("cancel my ride for tomorrow", "Your ride for tomorrow has been cancelled successfully."),
    ("did I book a ride for Monday?", "Let me check your bookings for Monday..."),
    ("book multiple days", "What are the start and end dates for your multi-day booking?"),
];

pub fn builtin_pairs() -> Vec<Pair> {
    BUILTIN.iter().map(|(i, o)| Pair::new(*i, *o)).collect()
}
