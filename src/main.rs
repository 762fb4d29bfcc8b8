use std::env;

use apiezon_heat::EvaluationRequest;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "temperatures.json5".into());
    let request = EvaluationRequest::load(&path)?;
    log::debug!("Loaded {:?} from {}", request, path);

    let heats = request.evaluate()?;
    if !request.echo {
        println!("{:?}", heats.values());
    }

    anyhow::Result::Ok(())
}
