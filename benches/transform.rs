use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crewgen::{transform_str, AppConfigBuilder, BackendPlatform, Rgb};

const TEMPLATE: &str = "\
<title>{{APP_NAME}}</title>
<meta name=\"theme-color\" content=\"{{THEME_COLOR}}\">
:root { --primary: {{PRIMARY_500}}; --primary-light: {{PRIMARY_100}}; }
{{#FEATURE_COMMENTS}}<section id=\"comments\">{{EVENT_EMOJI}}</section>{{/FEATURE_COMMENTS}}
{{#ENABLE_SLACK}}Slack: {{SLACK_CHANNEL}}{{/ENABLE_SLACK}}
Visit {{WEB_APP_URL}}.
";

pub fn transform_one_file(c: &mut Criterion) {
    let config = AppConfigBuilder::default()
        .app_name("Lunch Crew")
        .app_name_kebab("lunch-crew")
        .app_short_name("Lunch")
        .app_description("Daily lunch crew sign-up")
        .event_name("Lunch")
        .event_emoji("🍽️")
        .theme_color("#4CAF50".parse::<Rgb>().unwrap())
        .app_icon("utensils")
        .feature_comments(true)
        .feature_notifications(false)
        .feature_slack(false)
        .backend_platform(BackendPlatform::Cloudflare)
        .cron_schedule("0 2 * * 1-5")
        .output_path("./lunch-crew")
        .build()
        .unwrap();

    c.bench_function("transform single template", |b| {
        b.iter(|| transform_str(black_box(TEMPLATE), black_box(&config)))
    });
}

criterion_group!(benches, transform_one_file);
criterion_main!(benches);
