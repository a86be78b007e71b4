use ficha_mechanics::resolve_dice_pool;

pub fn run(attribute: i32, dice: i32, bonus: i32) -> Result<(), String> {
    let formula = resolve_dice_pool(attribute, dice).with_numeric(bonus);
    println!("{formula}");
    Ok(())
}
