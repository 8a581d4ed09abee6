use csp_policy::{CspError, CspPolicyBuilder, Source};

fn main() -> Result<(), CspError> {
    println!("Content Security Policy example");

    let policy = CspPolicyBuilder::new()
        .use_defaults()
        .script_src([Source::StrictDynamic, Source::Self_])
        .img_src(["'self'", "data:"])
        .upgrade_insecure_requests()
        .override_with("report_to", "csp-endpoint")
        .build()?;

    let (name, value) = policy.header_pair();
    println!("{}: {}", name, value);
    println!("{}", policy.meta_tag());

    Ok(())
}
