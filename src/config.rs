#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_namespace: String,
    pub db_database: String,
    pub db_password: Option<String>,
    pub db_username: Option<String>,
    pub db_url: String,
    pub jwt_secret: String,
    pub jwt_duration_hours: i64,
    pub is_development: bool,
    pub port: u16,
    pub admin_email: Option<String>,
    pub admin_username: Option<String>,
    pub start_password: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let db_namespace = std::env::var("DB_NAMESPACE").unwrap_or("namespace".to_string());
        let db_database = std::env::var("DB_DATABASE").unwrap_or("database".to_string());
        let db_password = std::env::var("DB_PASSWORD").ok();
        let db_username = std::env::var("DB_USERNAME").ok();
        let db_url = std::env::var("DB_URL").unwrap_or("mem://".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").expect("Missing JWT_SECRET in env");
        let jwt_duration_hours = std::env::var("JWT_DURATION_HOURS").map_or(24, |t| {
            t.parse::<i64>()
                .expect("JWT_DURATION_HOURS must be number")
        });

        let is_development = std::env::var("DEVELOPMENT")
            .map(|v| v.eq("true"))
            .unwrap_or(false);

        let port = std::env::var("PORT").map_or(8080, |t| {
            t.parse::<u16>().expect("PORT must be number")
        });

        let admin_email = std::env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty());
        let admin_username = std::env::var("ADMIN_USERNAME").ok().filter(|v| !v.is_empty());
        let start_password = std::env::var("START_PASSWORD").ok().filter(|v| !v.is_empty());

        Self {
            db_namespace,
            db_database,
            db_password,
            db_username,
            db_url,
            jwt_secret,
            jwt_duration_hours,
            is_development,
            port,
            admin_email,
            admin_username,
            start_password,
        }
    }
}
