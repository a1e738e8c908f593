use log::LevelFilter;
use plexus_tracer::components::App;
use plexus_tracer::util::init_logging;

fn main() {
    init_logging(if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info });
    yew::Renderer::<App>::new().render();
}
