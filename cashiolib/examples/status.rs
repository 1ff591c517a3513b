use cashiolib::{
    formats::xml::BankDataXml,
    model::format_money,
    traits::ReadFormat,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: печатаем балансы из data.xml (stdin -> stdout)
    let b = BankDataXml::read(std::io::BufReader::new(std::io::stdin()))?;
    println!("Bank: ${}", format_money(b.bank));
    println!("Cash: ${}", format_money(b.cash));
    Ok(())
}
