use backpacker_common::Location;

pub const STARTING_MONEY: i64 = 5000;

/// Ticket price per great-circle kilometer, rounded to whole units.
pub const COST_PER_KM: f64 = 0.25;

pub const REWARD_PER_CORRECT_ANSWER: i64 = 100;

/// Paid when a job trial cannot be generated.
pub const PITY_PAYMENT: i64 = 100;

pub const DESTINATION_COUNT: usize = 8;
pub const JOBS_PER_ATTEMPT: usize = 8;
pub const TARGET_JOB_COUNT: usize = 5;
pub const MAX_JOB_ATTEMPTS: usize = 3;
pub const QUIZ_QUESTION_COUNT: usize = 10;

pub const CIRCUMNAVIGATION_DEGREES: f64 = 360.0;

pub const PLANE_MIN_KM: f64 = 2000.0;
pub const TRAIN_MIN_KM: f64 = 500.0;

const STARTING_CITIES: [(&str, &str, f64, f64); 6] = [
    ("New York", "USA", 40.7128, -74.0060),
    ("London", "UK", 51.5074, -0.1278),
    ("Tokyo", "Japan", 35.6895, 139.6917),
    ("Sydney", "Australia", -33.8688, 151.2093),
    ("Linköping", "Sweden", 58.4108, 15.6214),
    ("Rio de Janeiro", "Brazil", -22.9068, -43.1729),
];

/// The fixed cities a journey can begin from, in menu order.
pub fn starting_cities() -> Vec<Location> {
    STARTING_CITIES
        .iter()
        .map(|(city, country, lat, lng)| Location::new(*city, *country, *lat, *lng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_distinct_starting_cities() {
        let cities = starting_cities();
        assert_eq!(cities.len(), 6);
        assert_eq!(cities[0].city, "New York");
        assert_eq!(cities[4].city, "Linköping");

        let mut names: Vec<&str> = cities.iter().map(|c| c.city.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 6);
    }
}
