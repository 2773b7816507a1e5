use tariff_gdp::cli::Command;

fn main() {
    tariff_gdp::app::run_component(Command::Gdp);
}
