//! Page templates, compiled into the binary.

use minijinja::Environment;

pub const INDEX_PAGE: &str = "latest.html";
pub const DEVICE_PAGE: &str = "device.html";

pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("base.html", include_str!("../templates/base.html"))?;
    env.add_template(INDEX_PAGE, include_str!("../templates/latest.html"))?;
    env.add_template(DEVICE_PAGE, include_str!("../templates/device.html"))?;
    Ok(env)
}
