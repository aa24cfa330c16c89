//! Static reply texts.

/// Sent when a category report cannot be produced.
pub const NO_DATA: &str = "دیتا از API فراخوانی نشد یا خالی است! / لطفا ساعاتی دیگر امتحان کنید";

/// Sent for any message the bot does not recognise.
pub const HINT: &str =
    "لطفا از یکی از دکمه‌های پایین صفحه استفاده کنید یا دستور /start را بزنید.";

pub const KEYBOARD_PLACEHOLDER: &str = "انتخاب کنید";

pub const START: &str = "
سلام \u{1F64B}\u{200D}\u{2642}\u{FE0F}
به ربات <b> زر‌ ارز </b> خوش اومدی!

اینجا می‌تونی قیمت لحظه‌ای طلا، سکه و ارزهای پرکاربرد رو ببینی

برای شروع، یکی از گزینه‌های زیر رو انتخاب کن \u{1F447}
";

pub const HELP: &str = "
برای استفاده از ربات، فقط کافیه یکی از دکمه‌های زیر رو انتخاب کنید:

\u{1F4B0} قیمت طلا و سکه: نمایش لحظه‌ای قیمت انواع طلا و سکه.
\u{1F4B5} نرخ ارز: مشاهده نرخ دلار، یورو و سایر ارزها.
\u{1FA99} بازار کریپتوکارنسی: دریافت آخرین داده‌های بازار کریپتو به‌صورت لحظه‌ای.

\u{1F4CC} اگر ربات پاسخ نداد یا قیمت‌ها نمایش داده نشدن، چند ثانیه صبر کنید و دوباره امتحان کنید.

در صورت بروز مشکل، می‌تونید با پشتیبانی تماس بگیرید.
جهت ارتباط با سازنده از منوی سمت چپ گزینه تماس با سازنده رو انتخاب کنید. \u{1F64F}
";

pub const ABOUT: &str = "
من یک ربات هوشمند هستم که به‌صورت لحظه‌ای قیمت طلا، سکه، دلار و سایر ارزها رو نمایش می‌دم.
هدفم اینه که بدون نیاز به جست‌وجو در سایت‌ها یا کانال‌های مختلف، فقط با یک کلیک، جدیدترین قیمت‌ها رو در دسترس شما بذارم.
داده‌ها به‌صورت خودکار و مداوم به‌روزرسانی می‌شن تا همیشه جدیدترین اطلاعات رو ببینید. و به مرور امکانات دیگری هم اضافه می‌کنم.
و برای همیشه رایگان هستم \u{1F49B}
";

pub const CONTACT: &str = "
سلام! \u{1F64B}\u{200D}\u{2642}\u{FE0F}
من فرید اقبالی هستم، توسعه‌دهنده‌ی این ربات.

اگر پیشنهادی برای بهبود ربات داری یا مشکلی مشاهده کردی، لطفاً با ما در تماس باش.
\u{2709}\u{FE0F} ارتباط از طریق تلگرام: @farid_eghbali
\u{1F4E7} یا ایمیل: info@farideghbali.com

\u{1F4AC} پیشنهادها و نظراتتون باعث رشد ما می‌شه!
";
